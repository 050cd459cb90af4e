//! Concurrent per-year fetch and merge.
//!
//! A run partitions the requested range into calendar years, spawns one task
//! per year and waits for all of them together. Tasks share only the
//! read-only service keys of the [`DateSequence`], the fetcher and the sink;
//! each task owns its response and index, so price data is never locked.
//!
//! ```text
//! DateRange ──▶ DateSequence ──▶ service keys (Arc<[String]>, read-only)
//!     │
//!     ├── year N   ─▶ fetch ─▶ match ─▶ sink
//!     ├── year N+1 ─▶ fetch ─▶ match ─▶ sink
//!     └── ...
//!            join_all (barrier) ─▶ RunReport
//! ```
//!
//! Within a year rows are emitted in ascending date order. Across years no
//! order is imposed.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::fetcher::{fetch_or_absent, YearFetcher};
use crate::matcher::match_service_keys;
use crate::sink::ResultSink;
use crate::{DateRange, DateSequence, RangeError};

pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(10);

/// Dispatcher tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Upper bound for one year task; `None` waits indefinitely.
    pub task_timeout: Option<Duration>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            task_timeout: Some(DEFAULT_TASK_TIMEOUT),
        }
    }
}

/// How a single year task ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum YearOutcome {
    /// The year returned data; `rows` of them fell inside the range.
    Matched { rows: usize },
    /// Fetch failed or the year had no usable records.
    NoData,
    /// The task timed out, panicked, or could not write to the sink.
    Failed { cause: FailureCause, reason: String },
}

/// Why a year task ended in [`YearOutcome::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    Timeout,
    Aborted,
    /// Some of the year's rows were not written.
    Sink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearReport {
    pub year: i32,
    pub outcome: YearOutcome,
}

/// Summary of a completed run, one entry per year in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub years: Vec<YearReport>,
}

impl RunReport {
    pub fn years_dispatched(&self) -> usize {
        self.years.len()
    }

    pub fn years_with_data(&self) -> usize {
        self.count(|outcome| matches!(outcome, YearOutcome::Matched { .. }))
    }

    pub fn years_without_data(&self) -> usize {
        self.count(|outcome| matches!(outcome, YearOutcome::NoData))
    }

    pub fn years_failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, YearOutcome::Failed { .. }))
    }

    /// Years whose rows were matched but could not all be written.
    pub fn sink_failures(&self) -> impl Iterator<Item = &YearReport> + '_ {
        self.years.iter().filter(|report| {
            matches!(
                report.outcome,
                YearOutcome::Failed {
                    cause: FailureCause::Sink,
                    ..
                }
            )
        })
    }

    pub fn rows_emitted(&self) -> usize {
        self.years
            .iter()
            .map(|report| match report.outcome {
                YearOutcome::Matched { rows } => rows,
                _ => 0,
            })
            .sum()
    }

    pub fn outcome(&self, year: i32) -> Option<&YearOutcome> {
        self.years
            .iter()
            .find(|report| report.year == year)
            .map(|report| &report.outcome)
    }

    fn count(&self, predicate: impl Fn(&YearOutcome) -> bool) -> usize {
        self.years
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// What a run would fetch, without touching the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPlan {
    pub start: String,
    pub end: String,
    pub years: Vec<i32>,
    pub days: usize,
}

/// Fans a date range out to one concurrent fetch per calendar year.
#[derive(Clone)]
pub struct YearDispatcher {
    fetcher: Arc<dyn YearFetcher>,
    sink: Arc<dyn ResultSink>,
    config: DispatcherConfig,
}

impl YearDispatcher {
    pub fn new(fetcher: Arc<dyn YearFetcher>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            fetcher,
            sink,
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> DispatcherConfig {
        self.config
    }

    /// Validate the boundaries and describe the year partition.
    pub fn plan(first: &str, last: &str) -> Result<RunPlan, RangeError> {
        let range = DateRange::parse(first, last)?;
        Ok(RunPlan {
            start: range.start().to_string(),
            end: range.end().to_string(),
            years: range.years().collect(),
            days: DateSequence::from_range(&range).len(),
        })
    }

    /// Fetch every year of `first..=last` concurrently and emit matched rows.
    ///
    /// Boundary errors are returned before any task is spawned. Per-year
    /// failures only show up in the report.
    pub async fn run(&self, first: &str, last: &str) -> Result<RunReport, RangeError> {
        let range = DateRange::parse(first, last)?;
        Ok(self.run_range(&range).await)
    }

    pub async fn run_range(&self, range: &DateRange) -> RunReport {
        let keys: Arc<[String]> = DateSequence::from_range(range).service_keys().into();
        let years: Vec<i32> = range.years().collect();
        info!(
            start = %range.start(),
            end = %range.end(),
            years = years.len(),
            days = keys.len(),
            "dispatching year fetches"
        );

        let handles = years
            .iter()
            .map(|&year| {
                let fetcher = Arc::clone(&self.fetcher);
                let sink = Arc::clone(&self.sink);
                let keys = Arc::clone(&keys);
                let task_timeout = self.config.task_timeout;
                tokio::spawn(run_year(year, fetcher, sink, keys, task_timeout))
            })
            .collect::<Vec<_>>();

        let joined = join_all(handles).await;

        let reports = years
            .into_iter()
            .zip(joined)
            .map(|(year, result)| {
                let outcome = result.unwrap_or_else(|error| {
                    warn!(year, %error, "year task aborted");
                    YearOutcome::Failed {
                        cause: FailureCause::Aborted,
                        reason: format!("task aborted: {error}"),
                    }
                });
                YearReport { year, outcome }
            })
            .collect();

        let report = RunReport { years: reports };
        info!(
            years = report.years_dispatched(),
            with_data = report.years_with_data(),
            failed = report.years_failed(),
            rows = report.rows_emitted(),
            "run complete"
        );
        report
    }
}

async fn run_year(
    year: i32,
    fetcher: Arc<dyn YearFetcher>,
    sink: Arc<dyn ResultSink>,
    keys: Arc<[String]>,
    task_timeout: Option<Duration>,
) -> YearOutcome {
    debug!(year, "year task started");

    let fetched = match task_timeout {
        Some(limit) => {
            match tokio::time::timeout(limit, fetch_or_absent(fetcher.as_ref(), year)).await {
                Ok(fetched) => fetched,
                Err(_) => {
                    warn!(year, timeout_ms = limit.as_millis() as u64, "year task timed out");
                    return YearOutcome::Failed {
                        cause: FailureCause::Timeout,
                        reason: format!("timed out after {} ms", limit.as_millis()),
                    };
                }
            }
        }
        None => fetch_or_absent(fetcher.as_ref(), year).await,
    };

    let Some(response) = fetched.filter(|response| response.has_data()) else {
        debug!(year, "no usable data");
        return YearOutcome::NoData;
    };

    let rows = match_service_keys(&response, &keys);
    for row in &rows {
        if let Err(error) = sink.emit(row) {
            warn!(year, %error, "sink rejected row; skipping rest of year");
            return YearOutcome::Failed {
                cause: FailureCause::Sink,
                reason: error.to_string(),
            };
        }
    }

    debug!(year, rows = rows.len(), "year task finished");
    YearOutcome::Matched { rows: rows.len() }
}
