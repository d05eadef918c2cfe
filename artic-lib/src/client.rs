//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;
use crate::retry::RetryConfig;

/// Base URL of the public Art Institute of Chicago API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The client for the artworks collection API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be moved into
/// spawned fetch tasks freely.
///
/// # Example
///
/// ```ignore
/// use artic_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.fetch_page(PageQuery::new(1, 12)).await?;
/// ```
#[derive(Clone)]
pub struct ArticClient {
    pub(crate) inner: Arc<ArticClientInner>,
}

pub(crate) struct ArticClientInner {
    pub(crate) base_url: Url,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry_config: RetryConfig,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Creates a client against the public API with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("retry", &self.inner.retry_config)
            .finish()
    }
}

/// Builder for constructing an [`ArticClient`].
///
/// Every field has a default, so `ArticClient::builder().build()` talks to the
/// public API with a 30 second timeout and the default [`RetryConfig`].
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .base_url("http://127.0.0.1:8080/api/v1")
///     .timeout(Duration::from_secs(5))
///     .retry(RetryConfig::no_retry())
///     .build()?;
/// ```
pub struct ArticClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }

    /// Sets the API base URL.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the request timeout; a hung request then stays pending forever.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry behavior.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArticClient`].
    pub fn build(self) -> Result<ArticClient, Error> {
        let trimmed = self.base_url.trim_end_matches('/');
        // Trailing slash so `join("artworks")` appends instead of replacing.
        let base_url = Url::parse(&format!("{}/", trimmed))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
