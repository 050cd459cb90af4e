use thiserror::Error;

/// Errors that abort a run before any year is dispatched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("date must match d-Month-yyyy (e.g. 1-January-2000): '{value}'")]
    DateParse { value: String },

    #[error("date range is empty: '{start}' is after '{end}'")]
    InvalidRange { start: String, end: String },
}

/// Failure writing an emitted row to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

