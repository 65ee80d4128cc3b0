//! Error types for churchcal.

use thiserror::Error;

/// Errors that can occur in churchcal operations.
#[derive(Error, Debug)]
pub enum ChurchCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Event '{event_id}' has a malformed start date '{value}': {reason}")]
    MalformedDate {
        event_id: String,
        value: String,
        reason: String,
    },

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChurchCalError {
    fn from(err: serde_json::Error) -> Self {
        ChurchCalError::Serialization(err.to_string())
    }
}

/// Result type alias for churchcal operations.
pub type ChurchCalResult<T> = Result<T, ChurchCalError>;
