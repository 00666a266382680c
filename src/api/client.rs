//! HTTP client wrapper for the checking service API.
//!
//! This module provides the `ApiClient` struct which issues requests against
//! a configured base URL and normalizes JSON and error bodies into a single
//! shape: success yields the parsed body (or `None` for empty/non-JSON
//! bodies), failure yields an [`ApiError`] with a human-readable reason.

use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::error::ApiError;

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout (2 minutes; uploads of large documents).
pub const READ_TIMEOUT_SECS: u64 = 120;

/// Request body for [`ApiClient::post_json`].
///
/// The API accepts two body shapes and the client deliberately never sets a
/// `Content-Type` header itself: a multipart form carries its own boundary
/// header (set by the transport), and a raw JSON string is sent opaquely so
/// endpoints that sniff the body keep working.
#[derive(Debug)]
pub enum Payload {
    /// Multipart form data (file upload plus string fields).
    Multipart(reqwest::multipart::Form),
    /// A pre-serialized JSON document sent as the raw request body.
    Json(String),
}

/// HTTP client for the checking service.
///
/// Created once at startup with the deployment's base URL and reused for all
/// requests, taking advantage of connection pooling. Every call is a fresh,
/// independent request: no retries, no caching.
///
/// # Example
///
/// ```no_run
/// use gostcheck_core::api::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://127.0.0.1:8000/api")?;
/// let job = client.get_json("/jobs/3f2b").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the base URL does not parse
    /// as an absolute `http`/`https` URL, or [`ApiError::ClientBuild`] when
    /// HTTP client construction fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`new`](Self::new).
    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|_| ApiError::invalid_base_url(&base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::invalid_base_url(&base_url));
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(default_user_agent())
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;

        Ok(Self { http, base_url })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a request path against the configured base URL.
    ///
    /// Paths that already carry an absolute `http://`/`https://` scheme pass
    /// through unchanged; anything else is prefixed with the base URL exactly
    /// once. Callers can therefore pass either a full URL or a service path
    /// and get consistent routing.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{path}", self.base_url)
        }
    }

    /// Performs an HTTP call and returns the parsed JSON body.
    ///
    /// The full response body is read as text and leniently parsed: an empty
    /// or non-JSON body on a successful status yields `Ok(None)` rather than
    /// an error, because some endpoints legitimately return empty bodies.
    /// Success is determined solely by the HTTP status class (2xx).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`]/[`ApiError::Timeout`] when the transport
    /// fails, or [`ApiError::Status`] on a non-2xx response. The status
    /// error's message is, in priority order: the body's non-empty `detail`
    /// field, else its non-empty `message` field, else `HTTP {status}`.
    #[instrument(level = "debug", skip(self, payload), fields(path = %path))]
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.resolve_url(path);
        let mut request = self.http.request(method, url.as_str());
        if let Some(payload) = payload {
            request = match payload {
                Payload::Multipart(form) => request.multipart(form),
                Payload::Json(raw) => request.body(raw),
            };
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(&url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(&url, e))?;
        let data = parse_lenient(&text);

        if !status.is_success() {
            let message = error_message(data.as_ref(), status.as_u16());
            debug!(status = status.as_u16(), %message, "request failed");
            return Err(ApiError::status(url, status.as_u16(), message));
        }

        Ok(data)
    }

    /// Issues a GET request and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`request_json`](Self::request_json).
    pub async fn get_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.request_json(Method::GET, path, None).await
    }

    /// Issues a POST request with the given payload.
    ///
    /// No `Content-Type` header is set by this method; see [`Payload`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`request_json`](Self::request_json).
    pub async fn post_json(&self, path: &str, payload: Payload) -> Result<Option<Value>, ApiError> {
        self.request_json(Method::POST, path, Some(payload)).await
    }

    /// Returns a reference to the underlying reqwest client.
    ///
    /// Used by callers that need raw (non-JSON) responses, such as the
    /// result download path.
    #[must_use]
    pub fn http(&self) -> &Client {
        &self.http
    }
}

fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("gostcheck/{version}")
}

/// Lenient body parse: empty or malformed JSON becomes `None`, never an error.
fn parse_lenient(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

/// Extracts a human-readable error reason from a parsed error body.
///
/// Priority: non-empty `detail`, then non-empty `message` (a source
/// convention of this backend, not a universal standard), then a synthesized
/// `HTTP {status}` string.
fn error_message(data: Option<&Value>, status: u16) -> String {
    data.and_then(|body| {
        non_empty_str(body.get("detail")).or_else(|| non_empty_str(body.get("message")))
    })
    .map_or_else(|| format!("HTTP {status}"), str::to_string)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
