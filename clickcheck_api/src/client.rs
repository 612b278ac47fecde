//! HTTP client for the ClickCheck API.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    request::{BlacklistLookup, BlacklistReport, EvaluationMode, ScanRequest},
    types::{ApiResponse, Balance, BlacklistStatus, ReportResult, ScanResult},
    user_agent::get_user_agent,
    Error,
};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.getclickcheck.com/api/v1";

/// Request timeout used unless overridden. Scans can take a while server-side.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Retry delay assumed when a 429 response carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// HTTP client for the ClickCheck API.
///
/// Every request carries the bearer token and a JSON content type. The
/// underlying `reqwest::Client` is built once and reused across calls.
/// Nothing is retried: rate-limit and credit errors are returned to the
/// caller as typed [`Error`] variants.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    timeout: Duration,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`] when the base URL or timeout need overriding.
pub struct ClientBuilder {
    api_token: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration and builds the client.
    pub fn build(self) -> Result<Client, Error> {
        let base_api_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_api_url).map_err(|e| {
            Error::InvalidArgument(format!("Invalid base URL {}: {}", base_api_url, e))
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_token))
            .map_err(|_| {
                Error::InvalidArgument("API token is not a valid header value".to_string())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::from(e)
            })?;

        Ok(Client {
            http,
            base_api_url,
            timeout: self.timeout,
        })
    }
}

impl Client {
    /// Creates a client pointing at the production API with the default timeout.
    pub fn new(api_token: &str) -> Result<Self, Error> {
        Self::builder(api_token).build()
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_token: &str) -> Result<Self, Error> {
        Self::builder(api_token).base_url(base_url).build()
    }

    pub fn builder(api_token: &str) -> ClientBuilder {
        ClientBuilder {
            api_token: api_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidArgument(format!("Invalid request URL: {}", e))
        })
    }

    async fn get<T>(&self, url: Url) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        self.send(Method::GET, url, None::<&()>).await
    }

    async fn post<T, B>(&self, url: Url, body: &B) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.send(Method::POST, url, Some(body)).await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let path = url.path().to_string();
        tracing::debug!("{} {}", method, path);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", path, e);
            Error::from(e)
        })?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let err = rate_limit_error(resp.headers());
            tracing::warn!("{}", err);
            return Err(err);
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::from(e)
        })?;

        if status == StatusCode::PAYMENT_REQUIRED {
            let err = insufficient_credits_error(&body);
            tracing::warn!("{}", err);
            return Err(err);
        }

        if !status.is_success() {
            let err = api_error(status, &body);
            tracing::error!("Request to {} failed with status {}: {}", path, status, err);
            return Err(err);
        }

        serde_json::from_str::<Value>(&body)
            .and_then(ApiResponse::from_value)
            .map_err(|e| {
                tracing::error!("Failed to parse response: {} | body: {}", e, truncate_body(&body));
                Error::Decode(e.to_string())
            })
    }

    /// Analyzes a URL for privacy and security risks.
    pub async fn scan_url(
        &self,
        url: &str,
        evaluation_mode: EvaluationMode,
    ) -> Result<ApiResponse<ScanResult>, Error> {
        let request = ScanRequest::new(url).with_evaluation_mode(evaluation_mode);
        self.post(self.get_url("/scans/analyze")?, &request).await
    }

    /// Like [`Client::scan_url`], taking the evaluation mode as text.
    ///
    /// Fails with [`Error::InvalidArgument`] before anything is sent when the
    /// mode is not one of `default`, `strict` or `lenient`.
    pub async fn scan_url_with_mode(
        &self,
        url: &str,
        evaluation_mode: &str,
    ) -> Result<ApiResponse<ScanResult>, Error> {
        let evaluation_mode = evaluation_mode.parse::<EvaluationMode>()?;
        self.scan_url(url, evaluation_mode).await
    }

    /// Checks whether a domain, or a specific URL on it, is blacklisted.
    pub async fn check_blacklist(
        &self,
        domain: &str,
        url: Option<&str>,
    ) -> Result<ApiResponse<BlacklistStatus>, Error> {
        let mut lookup = BlacklistLookup::new(domain);
        if let Some(url) = url {
            lookup = lookup.with_url(url);
        }
        let url = lookup.add_to_url(&self.get_url("/check")?);
        self.get(url).await
    }

    /// Reports a domain to the blacklist. Verified reports earn reward credits.
    pub async fn report_blacklist(
        &self,
        report: &BlacklistReport,
    ) -> Result<ApiResponse<ReportResult>, Error> {
        self.post(self.get_url("/blacklist/report")?, report).await
    }

    /// Fetches the credit balance and usage of the API token.
    pub async fn get_balance(&self) -> Result<ApiResponse<Balance>, Error> {
        self.get(self.get_url("/balance")?).await
    }
}

fn header_str<'a>(
    headers: &'a HeaderMap,
    name: impl reqwest::header::AsHeaderName,
) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

fn rate_limit_error(headers: &HeaderMap) -> Error {
    let retry_after = header_str(headers, RETRY_AFTER)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
    let limit = header_str(headers, RATE_LIMIT_LIMIT).and_then(|v| v.parse::<u64>().ok());
    let remaining = header_str(headers, RATE_LIMIT_REMAINING)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    let limit_text = limit
        .map(|l| l.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    Error::RateLimited {
        message: format!(
            "Rate limit exceeded. Limit: {}/minute, Remaining: {}. Retry after {} seconds.",
            limit_text, remaining, retry_after
        ),
        retry_after,
        limit,
        remaining,
    }
}

fn insufficient_credits_error(body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| detail_message(&value))
        .unwrap_or_else(|| "Insufficient credits".to_string());
    Error::InsufficientCredits(message)
}

fn api_error(status: StatusCode, body: &str) -> Error {
    let status = status.as_u16();
    let message = match serde_json::from_str::<Value>(body) {
        Ok(value) => detail_message(&value).unwrap_or_else(|| format!("HTTP {}", status)),
        Err(_) => format!("HTTP {}: {}", status, truncate_body(body)),
    };
    Error::Api { status, message }
}

/// Extracts the `detail` field of an error body. Non-string details are
/// rendered as compact JSON.
fn detail_message(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    body.chars().take(MAX).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderName;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn rate_limit_reads_headers() {
        let err = rate_limit_error(&headers(&[
            ("retry-after", "30"),
            ("x-ratelimit-limit", "100"),
            ("x-ratelimit-remaining", "5"),
        ]));
        match err {
            Error::RateLimited {
                message,
                retry_after,
                limit,
                remaining,
            } => {
                assert_eq!(retry_after, 30);
                assert_eq!(limit, Some(100));
                assert_eq!(remaining, 5);
                assert_eq!(
                    message,
                    "Rate limit exceeded. Limit: 100/minute, Remaining: 5. Retry after 30 seconds."
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rate_limit_defaults_when_headers_missing() {
        let err = rate_limit_error(&HeaderMap::new());
        match err {
            Error::RateLimited {
                message,
                retry_after,
                limit,
                remaining,
            } => {
                assert_eq!(retry_after, 60);
                assert_eq!(limit, None);
                assert_eq!(remaining, 0);
                assert!(message.contains("Limit: unknown/minute"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rate_limit_tolerates_unparsable_values() {
        let err = rate_limit_error(&headers(&[
            ("retry-after", "Wed, 21 Oct 2026 07:28:00 GMT"),
            ("x-ratelimit-limit", "unknown"),
        ]));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn insufficient_credits_uses_detail() {
        let err = insufficient_credits_error(r#"{"detail": "Balance too low: 0.0 credits"}"#);
        assert_eq!(err.to_string(), "Balance too low: 0.0 credits");
    }

    #[test]
    fn insufficient_credits_falls_back() {
        assert_eq!(insufficient_credits_error("").to_string(), "Insufficient credits");
        assert_eq!(insufficient_credits_error("{}").to_string(), "Insufficient credits");
        assert_eq!(
            insufficient_credits_error("<html>402</html>").to_string(),
            "Insufficient credits"
        );
    }

    #[test]
    fn api_error_prefers_detail() {
        let err = api_error(StatusCode::FORBIDDEN, r#"{"detail": "PRO subscription required"}"#);
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.to_string(), "PRO subscription required");
    }

    #[test]
    fn api_error_without_detail() {
        let err = api_error(StatusCode::NOT_FOUND, r#"{"error": "missing"}"#);
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn api_error_renders_structured_detail() {
        let err = api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "url"], "msg": "field required"}]}"#,
        );
        assert_eq!(err.status_code(), Some(422));
        assert!(err.to_string().contains("field required"));
    }

    #[test]
    fn api_error_truncates_non_json_body() {
        let body = "x".repeat(500);
        let err = api_error(StatusCode::BAD_GATEWAY, &body);
        assert_eq!(err.to_string(), format!("HTTP 502: {}", "x".repeat(200)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "ä".repeat(300);
        assert_eq!(truncate_body(&body).chars().count(), 200);
    }

    #[test]
    fn defaults_applied() {
        let client = Client::new("test_token").unwrap();
        assert_eq!(client.base_url(), "https://api.getclickcheck.com/api/v1");
        assert_eq!(client.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn builder_overrides_and_trims_base_url() {
        let client = Client::builder("test_token")
            .base_url("https://custom-url.com/api/v1/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://custom-url.com/api/v1");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = Client::with_base_url("not a url", "test_token").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn rejects_token_with_newline() {
        let err = Client::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let builder = Client::builder("super-secret");
        assert!(!format!("{:?}", builder).contains("super-secret"));
        let client = builder.build().unwrap();
        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
