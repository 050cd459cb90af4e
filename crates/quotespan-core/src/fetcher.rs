//! Per-year access to the price-quote service.
//!
//! The service answers one calendar year per query (`?date=<year>`), so the
//! fetch contract is keyed by year. A failure here is never fatal to a run:
//! [`fetch_or_absent`] turns every [`FetchFailure`] into "no data for that
//! year" after logging it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::YearResponse;

pub const DEFAULT_BASE_URL: &str = "https://jsonmock.hackerrank.com/api/stocks/search";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Why a year produced no response. Scoped to that year only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("upstream returned an empty body")]
    EmptyBody,

    #[error("malformed payload: {message}")]
    Decode { message: String },
}

/// Source of one year's price records.
pub trait YearFetcher: Send + Sync {
    /// Issue exactly one upstream request for `year`.
    fn fetch_year<'a>(
        &'a self,
        year: i32,
    ) -> Pin<Box<dyn Future<Output = Result<YearResponse, FetchFailure>> + Send + 'a>>;
}

/// Fetch `year`, collapsing any failure to `None`.
pub async fn fetch_or_absent(fetcher: &dyn YearFetcher, year: i32) -> Option<YearResponse> {
    match fetcher.fetch_year(year).await {
        Ok(response) => Some(response),
        Err(failure) => {
            warn!(year, error = %failure, "year fetch failed; treating as no data");
            None
        }
    }
}

/// [`YearFetcher`] backed by the HTTP quote service.
#[derive(Clone)]
pub struct QuoteServiceFetcher {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl Default for QuoteServiceFetcher {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()))
    }
}

impl QuoteServiceFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn year_request(&self, year: i32) -> HttpRequest {
        HttpRequest::get(self.base_url.as_str())
            .with_query("date", year)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }
}

impl YearFetcher for QuoteServiceFetcher {
    fn fetch_year<'a>(
        &'a self,
        year: i32,
    ) -> Pin<Box<dyn Future<Output = Result<YearResponse, FetchFailure>> + Send + 'a>> {
        Box::pin(async move {
            let request = self.year_request(year);
            debug!(year, url = %request.url, "requesting year");

            let response = self
                .http_client
                .execute(request)
                .await
                .map_err(|error| FetchFailure::Transport {
                    message: error.message().to_owned(),
                })?;

            if !response.is_success() {
                return Err(FetchFailure::Status {
                    status: response.status,
                });
            }

            decode_year_response(&response.body)
        })
    }
}

/// Decode a response body, rejecting blank bodies before parsing.
pub fn decode_year_response(body: &str) -> Result<YearResponse, FetchFailure> {
    if body.trim().is_empty() {
        return Err(FetchFailure::EmptyBody);
    }

    serde_json::from_str(body).map_err(|error| FetchFailure::Decode {
        message: error.to_string(),
    })
}
