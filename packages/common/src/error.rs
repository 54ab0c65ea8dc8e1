use thiserror::Error;

/// Errors raised while turning contest, team and submission documents into the
/// entity model.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid time value for `{field}`: {value}")]
    InvalidTime { field: &'static str, value: String },

    #[error("Invalid identifier for `{field}`: {value}")]
    InvalidId { field: &'static str, value: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, BoardError>;
