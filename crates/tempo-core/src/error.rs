//! Error types for the TEMPO game clock

use thiserror::Error;

/// Errors surfaced to callers of the time engine and façade
#[derive(Error, Debug)]
pub enum TimeError {
    #[error("time dilation must be non-negative and finite, got {value}")]
    InvalidDilation { value: f64 },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("duration must be non-negative, got {value}")]
    NegativeDuration { value: f64 },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown time action: {0}")]
    UnknownAction(String),
}

/// Result type for time operations
pub type TimeResult<T> = Result<T, TimeError>;

/// Errors from the persistence adapter. These never reach external callers;
/// the engine logs them and keeps the in-memory state authoritative.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid clock record: {0}")]
    Format(String),
}

/// Error returned by a clock observer. Observer failures are isolated and
/// logged by the notifier; they never affect the mutation or other observers.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ObserverError(pub String);

impl From<String> for ObserverError {
    fn from(msg: String) -> Self {
        ObserverError(msg)
    }
}

impl From<&str> for ObserverError {
    fn from(msg: &str) -> Self {
        ObserverError(msg.to_string())
    }
}
