//! Error types for calgrid.

use thiserror::Error;

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Invalid event: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an event draft is refused before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,

    #[error("date is required")]
    EmptyDate,

    #[error("invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),
}

impl From<serde_json::Error> for CalGridError {
    fn from(e: serde_json::Error) -> Self {
        CalGridError::Serialization(e.to_string())
    }
}

impl CalGridError {
    /// True when the caller's input was refused, as opposed to a storage failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CalGridError::Validation(_))
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
