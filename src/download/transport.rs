//! HTTP transport capability.
//!
//! The engine and the run orchestration issue GET requests through the
//! [`Transport`] trait; [`HttpTransport`] is the reqwest-backed production
//! implementation. A response is returned for every HTTP status - status
//! policy (200 vs. everything else) belongs to the callers, while
//! transport-level failures (DNS, refused connections, timeouts) surface
//! as [`DownloadError`]s.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;

/// A completed GET request: HTTP status plus the full response body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// The body decoded as text (lossy for invalid UTF-8).
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Capability to issue HTTP GET requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request and returns the status and full body.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] only for transport-level failures
    /// (invalid URL, network error, timeout); HTTP error statuses are
    /// returned as responses.
    async fn get(&self, url: &str) -> Result<FetchResponse, DownloadError>;
}

/// Production HTTP transport backed by a shared reqwest client.
///
/// Created once per run and reused for every request, taking advantage of
/// connection pooling.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Creates a transport with default timeouts (30s connect, 2min read)
    /// and gzip decompression enabled.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a transport with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<FetchResponse, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DownloadError::timeout(url)
                } else {
                    DownloadError::network(url, e)
                }
            })?
            .to_vec();

        debug!(url = %url, status, bytes = body.len(), "GET complete");
        Ok(FetchResponse { status, body })
    }
}

/// Default User-Agent identifying the tool.
fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("uimg/{version}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_user_agent_carries_version() {
        let ua = default_user_agent();
        assert!(ua.starts_with("uimg/"));
        assert!(ua.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_fetch_response_text_decodes_body() {
        let response = FetchResponse {
            status: 200,
            body: b"hello".to_vec(),
        };
        assert_eq!(response.text(), "hello");
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"image bytes"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new();
        let url = format!("{}/a.png", mock_server.uri());

        let response = transport.get(&url).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"image bytes");
    }

    #[tokio::test]
    async fn test_get_passes_through_error_statuses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new();
        let url = format!("{}/missing.png", mock_server.uri());

        // Non-200 is a response, not a transport error
        let response = transport.get(&url).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_get_rejects_invalid_url() {
        let transport = HttpTransport::new();
        let result = transport.get("not-a-valid-url").await;
        assert!(matches!(result, Err(DownloadError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_get_reports_network_error_for_unreachable_server() {
        let mock_server = MockServer::start().await;
        let url = format!("{}/gone", mock_server.uri());
        // Shut the server down so the connection is refused
        drop(mock_server);

        let transport = HttpTransport::new();
        let result = transport.get(&url).await;
        assert!(matches!(
            result,
            Err(DownloadError::Network { .. } | DownloadError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_sends_identifying_user_agent() {
        use wiremock::{Match, Request};

        struct UaMatcher;

        impl Match for UaMatcher {
            fn matches(&self, request: &Request) -> bool {
                request
                    .headers
                    .get("User-Agent")
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|ua| ua.starts_with("uimg/"))
            }
        }

        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ua-check"))
            .and(UaMatcher)
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok"))
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new();
        let url = format!("{}/ua-check", mock_server.uri());
        let response = transport.get(&url).await.unwrap();
        assert_eq!(response.status, 200, "UA matcher must have accepted the request");
    }
}
