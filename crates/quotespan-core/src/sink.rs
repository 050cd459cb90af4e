//! Destinations for matched rows.
//!
//! Year tasks emit concurrently, so every sink must accept rows from several
//! tasks at once. Each row is rendered first and written as one complete line
//! while holding the sink lock; rows of different years may interleave but a
//! line never does.

use std::fs::File;
use std::io::{BufWriter, Stdout, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::{DayQuote, SinkError};

/// Line encoding for emitted rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowFormat {
    /// `<date> <open> <close>`
    #[default]
    Text,
    /// One JSON object per line.
    Ndjson,
}

impl RowFormat {
    pub fn render(self, row: &DayQuote) -> Result<String, SinkError> {
        match self {
            Self::Text => Ok(row.to_string()),
            Self::Ndjson => Ok(serde_json::to_string(row)?),
        }
    }
}

/// Consumer of matched `(date, open, close)` rows.
pub trait ResultSink: Send + Sync {
    fn emit(&self, row: &DayQuote) -> Result<(), SinkError>;

    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink writing one line per row to any [`Write`] target.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    format: RowFormat,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W, format: RowFormat) -> Self {
        Self {
            format,
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<Stdout> {
    pub fn stdout(format: RowFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl WriterSink<BufWriter<File>> {
    pub fn create_file(path: impl AsRef<Path>, format: RowFormat) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), format))
    }
}

impl<W: Write + Send> ResultSink for WriterSink<W> {
    fn emit(&self, row: &DayQuote) -> Result<(), SinkError> {
        let mut line = self.format.render(row)?;
        line.push('\n');

        let mut writer = self
            .writer
            .lock()
            .expect("sink writer lock is not poisoned");
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.writer
            .lock()
            .expect("sink writer lock is not poisoned")
            .flush()?;
        Ok(())
    }
}

/// In-memory sink that keeps rows in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Mutex<Vec<DayQuote>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<DayQuote> {
        self.rows
            .lock()
            .expect("memory sink lock is not poisoned")
            .clone()
    }

    /// Rows rendered as text lines, in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.rows().iter().map(ToString::to_string).collect()
    }
}

impl ResultSink for MemorySink {
    fn emit(&self, row: &DayQuote) -> Result<(), SinkError> {
        self.rows
            .lock()
            .expect("memory sink lock is not poisoned")
            .push(row.clone());
        Ok(())
    }
}
