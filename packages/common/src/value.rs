//! Helpers for loosely typed document fields.

use serde_json::Value;

use crate::error::{BoardError, Result};

/// Identifiers show up as both strings and integers in real feeds; they are
/// always compared as strings.
pub fn id_from_value(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(BoardError::MissingField(field)),
        other => Err(BoardError::InvalidId {
            field,
            value: other.to_string(),
        }),
    }
}

/// Read an optional list of names. A bare string becomes a one-element list and
/// anything else is dropped.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
