//! # Domain Models
//!
//! Value types shared by the fetch pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CalendarDate`] | Naive date in the service's `d-Month-yyyy` format |
//! | [`DateRange`] | Validated inclusive range, partitioned into years |
//! | [`DateSequence`] | Every day of a range, ascending |
//! | [`PriceRecord`] | One OHLC record from the quote service |
//! | [`YearResponse`] | One year's page of records |
//! | [`DayQuote`] | Emitted `(date, open, close)` row |
//!
//! Records are plain data; decoding is lenient, so a missing numeric field is
//! read as zero rather than rejected:
//!
//! ```rust
//! use quotespan_core::YearResponse;
//!
//! let response: YearResponse = serde_json::from_str(r#"{"per_page": 0}"#).unwrap();
//! assert!(!response.has_data());
//! ```

mod calendar_date;
mod date_range;
mod price;

pub use calendar_date::CalendarDate;
pub use date_range::{DateRange, DateSequence};
pub use price::{DayQuote, PriceRecord, YearResponse};
