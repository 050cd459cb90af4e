use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Range(#[from] quotespan_core::RangeError),

    #[error(transparent)]
    Sink(#[from] quotespan_core::SinkError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("output incomplete: rows for {years:?} were not written: {reason}")]
    IncompleteOutput { years: Vec<i32>, reason: String },
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Range(_) => 2,
            Self::Serialization(_) => 4,
            Self::Sink(_) => 10,
            Self::Io(_) => 10,
            Self::IncompleteOutput { .. } => 10,
        }
    }
}
