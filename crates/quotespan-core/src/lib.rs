//! # Quotespan Core
//!
//! Fetches daily open/close prices for a date range from a quote service that
//! only answers one calendar year per query.
//!
//! ## Overview
//!
//! - **Date handling**: boundary parsing and day-by-day expansion in the
//!   service's `d-Month-yyyy` format
//! - **Year fetcher**: one HTTP request per year, failures degrade to "no data"
//! - **Dispatcher**: one concurrent task per year, joined on a single barrier
//! - **Day matcher**: joins each year's records against the requested days
//! - **Sinks**: stdout, file, or in-memory row consumers
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dispatcher`] | Concurrent year fan-out and run reports |
//! | [`domain`] | Dates, ranges, records and emitted rows |
//! | [`error`] | Fatal range errors and sink errors |
//! | [`fetcher`] | Year fetcher trait and HTTP implementation |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`matcher`] | Date-to-record index and day join |
//! | [`sink`] | Row sinks |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quotespan_core::{QuoteServiceFetcher, RowFormat, WriterSink, YearDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = YearDispatcher::new(
//!         Arc::new(QuoteServiceFetcher::default()),
//!         Arc::new(WriterSink::stdout(RowFormat::Text)),
//!     );
//!
//!     let report = dispatcher.run("1-January-2000", "11-January-2000").await?;
//!     eprintln!("{} rows", report.rows_emitted());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only malformed or inverted boundaries abort a run ([`RangeError`]). A
//! failed year ([`FetchFailure`]) is logged and contributes no rows; the
//! other years still complete.

pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod matcher;
pub mod sink;

// Dispatcher
pub use dispatcher::{
    DispatcherConfig, FailureCause, RunPlan, RunReport, YearDispatcher, YearOutcome, YearReport,
    DEFAULT_TASK_TIMEOUT,
};

// Domain models
pub use domain::{CalendarDate, DateRange, DateSequence, DayQuote, PriceRecord, YearResponse};

// Error types
pub use error::{RangeError, SinkError};

// Fetching
pub use fetcher::{
    decode_year_response, fetch_or_absent, FetchFailure, QuoteServiceFetcher, YearFetcher,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS,
};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Matching
pub use matcher::{match_days, match_service_keys, DateToRecordIndex};

// Sinks
pub use sink::{MemorySink, ResultSink, RowFormat, WriterSink};
