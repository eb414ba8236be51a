//! Transport abstraction traits for Pushko.
//!
//! The client never talks HTTP directly. It hands a fully signed
//! [`HttpRequest`] to a [`Transport`] and interprets the returned
//! [`HttpResponse`].

use async_trait::async_trait;
use bytes::Bytes;
use pushko_protocol::Method;
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport could not be created.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),

    /// Could not connect to the remote host.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Request did not complete within its timeout.
    #[error("Request timed out")]
    Timeout,

    /// Failed to read the response.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the signed query string.
    pub url: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Bytes>,
    /// Time allowed for the whole request. Zero means no limit.
    pub timeout: Duration,
}

impl HttpRequest {
    /// Create a request with no headers or body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a JSON body and the matching content type.
    #[must_use]
    pub fn with_json_body(self, body: impl Into<Bytes>) -> Self {
        let mut request = self.with_header("Content-Type", "application/json");
        request.body = Some(body.into());
        request
    }

    /// Look up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a new response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is `200 OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Something that can carry a request to the service and bring back the response.
///
/// Implementations must be safe to share between concurrent callers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the full response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Get the transport name (e.g., "http").
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(Method::Post, "http://h:80/x", Duration::from_secs(5))
            .with_json_body(r#"{"a":1}"#);

        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(&b"{\"a\":1}"[..]));
        assert_eq!(request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_response_text() {
        let response = HttpResponse::new(202, "202 ACCEPTED\n");
        assert_eq!(response.text(), "202 ACCEPTED\n");
        assert!(!response.is_ok());
        assert!(HttpResponse::new(200, "").is_ok());
    }
}
