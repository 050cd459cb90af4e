//! Contract tests for the HTTP quote service boundary.
//!
//! A scripted `HttpClient` serves canned bodies per `date=<year>` query so the
//! real `QuoteServiceFetcher` decoding and the dispatcher run end to end
//! without a network.

use quotespan_core::{
    FetchFailure, HttpClient, HttpError, HttpRequest, HttpResponse, MemorySink,
    QuoteServiceFetcher, YearDispatcher, YearFetcher, YearOutcome, DEFAULT_BASE_URL,
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

const BASE_URL: &str = "https://quotes.example.test/api/stocks/search";

struct ScriptedQuoteService {
    responses: HashMap<String, Result<HttpResponse, HttpError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedQuoteService {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn on_year(mut self, year: i32, response: Result<HttpResponse, HttpError>) -> Self {
        self.responses
            .insert(format!("{BASE_URL}?date={year}"), response);
        self
    }

    fn requested_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .requests
            .lock()
            .expect("request log lock")
            .iter()
            .map(|request| request.url.clone())
            .collect();
        urls.sort();
        urls
    }
}

impl HttpClient for ScriptedQuoteService {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::with_status(404, "")));
        self.requests.lock().expect("request log lock").push(request);
        Box::pin(async move { response })
    }
}

fn year_body(records: &str) -> String {
    format!(
        r#"{{"page":1,"per_page":500,"total":3,"total_pages":1,"data":[{records}]}}"#
    )
}

fn fetcher(service: &Arc<ScriptedQuoteService>) -> QuoteServiceFetcher {
    QuoteServiceFetcher::new(service.clone()).with_base_url(BASE_URL)
}

#[test]
fn default_fetcher_targets_the_public_stock_search_endpoint() {
    assert_eq!(QuoteServiceFetcher::default().base_url(), DEFAULT_BASE_URL);
    assert!(DEFAULT_BASE_URL.ends_with("/api/stocks/search"));
}

#[tokio::test]
async fn fetcher_decodes_the_service_schema() {
    let service = Arc::new(ScriptedQuoteService::new().on_year(
        2000,
        Ok(HttpResponse::ok_json(year_body(
            r#"{"date":"5-January-2000","open":5265.09,"high":5464.35,"low":5184.48,"close":5357},
               {"date":"6-January-2000","open":5424.21,"high":5489.86,"low":5391.33,"close":5421.53}"#,
        ))),
    ));

    let response = fetcher(&service)
        .fetch_year(2000)
        .await
        .expect("valid payload");

    assert_eq!(response.page, 1);
    assert_eq!(response.total_pages, 1);
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[1].date, "6-January-2000");
    assert_eq!(response.data[1].low, 5391.33);
    assert_eq!(service.requested_urls(), vec![format!("{BASE_URL}?date=2000")]);
}

#[tokio::test]
async fn fetcher_classifies_each_failure_mode() {
    let service = Arc::new(
        ScriptedQuoteService::new()
            .on_year(1990, Err(HttpError::new("connection failed: dns")))
            .on_year(1991, Ok(HttpResponse::with_status(500, "{}")))
            .on_year(1992, Ok(HttpResponse::ok_json("")))
            .on_year(1993, Ok(HttpResponse::ok_json("{\"data\": ["))),
    );
    let fetcher = fetcher(&service);

    assert!(matches!(
        fetcher.fetch_year(1990).await,
        Err(FetchFailure::Transport { .. })
    ));
    assert_eq!(
        fetcher.fetch_year(1991).await,
        Err(FetchFailure::Status { status: 500 })
    );
    assert_eq!(fetcher.fetch_year(1992).await, Err(FetchFailure::EmptyBody));
    assert!(matches!(
        fetcher.fetch_year(1993).await,
        Err(FetchFailure::Decode { .. })
    ));
}

#[tokio::test]
async fn end_to_end_run_over_http_boundary() {
    let service = Arc::new(
        ScriptedQuoteService::new()
            .on_year(
                1999,
                Ok(HttpResponse::ok_json(year_body(
                    r#"{"date":"30-December-1999","open":10.5,"close":11},
                       {"date":"15-June-1999","open":1,"close":1}"#,
                ))),
            )
            .on_year(2000, Ok(HttpResponse::with_status(503, "busy")))
            .on_year(
                2001,
                Ok(HttpResponse::ok_json(year_body(
                    r#"{"date":"2-January-2001","open":20,"close":19.75}"#,
                ))),
            ),
    );
    let sink = Arc::new(MemorySink::new());
    let dispatcher = YearDispatcher::new(Arc::new(fetcher(&service)), sink.clone());

    let report = dispatcher
        .run("30-December-1999", "2-January-2001")
        .await
        .expect("valid range");

    assert_eq!(
        service.requested_urls(),
        vec![
            format!("{BASE_URL}?date=1999"),
            format!("{BASE_URL}?date=2000"),
            format!("{BASE_URL}?date=2001"),
        ]
    );
    assert_eq!(report.outcome(2000), Some(&YearOutcome::NoData));

    let mut lines = sink.lines();
    lines.sort();
    assert_eq!(
        lines,
        vec!["2-January-2001 20 19.75", "30-December-1999 10.5 11"]
    );
}
