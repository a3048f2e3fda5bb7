//! HTTP transport shared by every provider attempt.

use lookout_core::{LookoutError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper around a pooled `reqwest` client.
///
/// Every request goes out with caching disabled, since provider answers are
/// cached by the engine itself and only when they pass the quality gate.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
}

impl HttpClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// GET a URL and return its body.
    ///
    /// Connection failures and non-success statuses are errors; the caller
    /// decides whether that means skipping a provider.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_with_query(url, &[]).await
    }

    /// GET a URL with extra query parameters and return its body
    pub async fn fetch_with_query(&self, url: &str, params: &[(&str, &str)]) -> Result<String> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| LookoutError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookoutError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LookoutError::Http(e.to_string()))
    }

    /// GET a URL and deserialize its JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let body = self.fetch_with_query(url, params).await?;
        serde_json::from_str(&body).map_err(LookoutError::Json)
    }
}

/// Builder for configuring an [`HttpClient`]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("lookout/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<HttpClient> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| LookoutError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpClient {
            inner: Arc::new(ClientInner { http }),
        })
    }
}
