use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{BoardError, Result};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an absolute instant given either as unix seconds or as an ISO-8601 string.
///
/// Strings without an offset are read as UTC.
pub fn parse_instant(field: &'static str, value: &Value) -> Result<DateTime<Utc>> {
    let invalid = || BoardError::InvalidTime {
        field,
        value: value.to_string(),
    };

    match value {
        Value::Number(_) => {
            let secs = parse_seconds(field, value)?;
            DateTime::from_timestamp(secs, 0).ok_or_else(invalid)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(dt.with_timezone(&Utc));
            }
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Parse a whole number of seconds from a JSON number or a numeric string.
pub fn parse_seconds(field: &'static str, value: &Value) -> Result<i64> {
    let invalid = || BoardError::InvalidTime {
        field,
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                return Ok(v);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
                _ => Err(invalid()),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Render a number of seconds as `HH:MM:SS`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds % 3600 / 60,
        seconds % 60
    )
}
