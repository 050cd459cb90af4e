use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// GET request envelope used by the year fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: 3_000,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Append a `name=value` query pair. Values are expected to be URL-safe.
    pub fn with_query(mut self, name: &str, value: impl Display) -> Self {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url = format!("{}{separator}{name}={value}", self.url);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// HTTP response envelope returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Async transport contract so fetchers can run against fakes in tests.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production HTTP client backed by reqwest.
///
/// `reqwest::Client` pools connections internally, so clones share them. Each
/// response body is read to the end or dropped before `execute` returns.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quotespan/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let builder = request.headers.iter().fold(
            self.client
                .get(&request.url)
                .timeout(Duration::from_millis(request.timeout_ms)),
            |builder, (name, value)| builder.header(name, value),
        );

        let response = builder.send().await.map_err(|error| transport_error(&error))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| HttpError::new(format!("body read failed: {error}")))?;

        Ok(HttpResponse { status, body })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(self.get(request))
    }
}

fn transport_error(error: &reqwest::Error) -> HttpError {
    let stage = if error.is_timeout() {
        "request timeout"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid request"
    } else {
        "request failed"
    };
    HttpError::new(format!("{stage}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_use_the_right_separator() {
        let request = HttpRequest::get("https://example.test/api/stocks/search")
            .with_query("date", 2000)
            .with_query("page", 2);

        assert_eq!(
            request.url,
            "https://example.test/api/stocks/search?date=2000&page=2"
        );
    }

    #[test]
    fn header_names_are_lowercased() {
        let request =
            HttpRequest::get("https://example.test").with_header("Accept", "application/json");

        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn refused_connection_is_a_connection_failure() {
        let client = ReqwestHttpClient::with_client(
            reqwest::Client::builder()
                .no_proxy()
                .build()
                .expect("client builds"),
        );
        let request = HttpRequest::get("http://127.0.0.1:1/api/stocks/search")
            .with_query("date", 2000)
            .with_timeout_ms(2_000);

        let error = client.execute(request).await.expect_err("nothing listens on port 1");
        assert!(
            error.message().starts_with("connection failed"),
            "unexpected error: {error}"
        );
    }

    #[tokio::test]
    async fn malformed_url_is_an_invalid_request() {
        let client = ReqwestHttpClient::default();

        let error = client
            .execute(HttpRequest::get("not a url"))
            .await
            .expect_err("url does not parse");
        assert!(error.message().starts_with("invalid request"), "unexpected error: {error}");
    }

    #[test]
    fn success_covers_only_2xx() {
        assert!(HttpResponse::ok_json("{}").is_success());
        assert!(HttpResponse::with_status(204, "").is_success());
        assert!(!HttpResponse::with_status(301, "").is_success());
        assert!(!HttpResponse::with_status(503, "").is_success());
    }
}
