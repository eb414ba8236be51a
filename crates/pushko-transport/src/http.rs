//! HTTP transport implementation.
//!
//! This module provides the default transport using reqwest over rustls.

use async_trait::async_trait;
use pushko_protocol::Method;
use tracing::{debug, warn};

use crate::traits::{HttpRequest, HttpResponse, Transport, TransportError};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("pushko/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unavailable`] if the HTTP client cannot be
    /// initialised (for example when no TLS backend can be loaded).
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_body() || err.is_decode() {
        TransportError::ReceiveFailed(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.timeout.is_zero() {
            builder = builder.timeout(request.timeout);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, error = %e, "HTTP request failed");
            map_error(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_error)?;

        debug!(method = %request.method, status, bytes = body.len(), "HTTP response received");

        Ok(HttpResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_with_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apps/1/events"))
            .and(query_param("auth_key", "K"))
            .and(header("content-type", "application/json"))
            .and(body_string(r#"{"name":"e"}"#))
            .respond_with(ResponseTemplate::new(202).set_body_string("202 ACCEPTED\n"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let request = HttpRequest::new(
            Method::Post,
            format!("{}/apps/1/events?auth_key=K", server.uri()),
            Duration::from_secs(5),
        )
        .with_json_body(r#"{"name":"e"}"#);

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 202);
        assert_eq!(response.text(), "202 ACCEPTED\n");
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apps/1/channels"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let request = HttpRequest::new(
            Method::Get,
            format!("{}/apps/1/channels", server.uri()),
            Duration::from_secs(5),
        );

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.text(), "Unauthorized");
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let request = HttpRequest::new(
            Method::Get,
            format!("{}/slow", server.uri()),
            Duration::from_millis(100),
        );

        assert!(matches!(
            transport.send(request).await,
            Err(TransportError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_zero_timeout_is_unlimited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let request = HttpRequest::new(
            Method::Get,
            format!("{}/slow", server.uri()),
            Duration::ZERO,
        );

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let transport = HttpTransport::new().unwrap();
        // Port 9 (discard) is almost never listening on loopback.
        let request = HttpRequest::new(
            Method::Get,
            "http://127.0.0.1:9/apps/1/channels",
            Duration::from_secs(2),
        );

        assert!(transport.send(request).await.is_err());
    }
}
