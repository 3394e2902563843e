//! Error types for calendar conversion.

use thiserror::Error;

/// Errors that can occur while reading, converting or writing a calendar.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Expected {expected} at line {line}")]
    MissingMarker { expected: &'static str, line: usize },

    #[error("Event {event}: invalid {field} field: {reason}")]
    InvalidField {
        event: usize,
        field: &'static str,
        reason: String,
    },

    #[error("No timezone profile for '{0}'")]
    UnknownZone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for conversion operations.
pub type FixResult<T> = Result<T, FixError>;
