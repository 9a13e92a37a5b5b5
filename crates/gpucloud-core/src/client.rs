//! The authenticated query layer.
//!
//! [`QueryClient`] performs exactly one HTTP request per call: it fetches a bearer token,
//! sends the request and either parses the JSON body or returns a typed error. Retry policy
//! belongs to callers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;
use validator::Validate;

use crate::auth::{AuthTokenProvider, NoToken, StaticToken};
use crate::config::GpuCloudConfig;
use crate::error::{Error, Result};
use crate::types::Resource;

const USER_AGENT: &str = concat!("gpucloud-sdk/", env!("CARGO_PKG_VERSION"));

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
///
/// Transport-level knobs. Timeouts configured in [`GpuCloudConfig`] take precedence over
/// the timeout set here.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Log every request at debug level
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable request logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`QueryClient`].
#[derive(Clone)]
pub struct QueryClientBuilder {
    config: GpuCloudConfig,
    http_config: ClientConfig,
    auth: Option<Arc<dyn AuthTokenProvider>>,
    user_agent: String,
}

impl QueryClientBuilder {
    /// Create a builder from a [`GpuCloudConfig`].
    #[must_use]
    pub fn new(config: GpuCloudConfig) -> Self {
        Self {
            config,
            http_config: ClientConfig::new(),
            auth: None,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Use the given token provider for every request.
    #[must_use]
    pub fn with_token_provider(mut self, provider: Arc<dyn AuthTokenProvider>) -> Self {
        self.auth = Some(provider);
        self
    }

    /// Use a fixed bearer token.
    #[must_use]
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_token_provider(Arc::new(StaticToken::new(token)))
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Finalise the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation, the base URL is invalid or
    /// the HTTP client cannot be built.
    pub fn build(self) -> Result<QueryClient> {
        self.config.validate()?;
        let mut base_url = self.config.base_url()?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = ClientBuilder::new()
            .user_agent(self.user_agent.as_str())
            .timeout(self.config.timeout())
            .connect_timeout(self.config.connect_timeout())
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression)
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(QueryClient {
            http,
            base_url,
            auth: self.auth.unwrap_or_else(|| Arc::new(NoToken)),
            log_requests: self.http_config.enable_logging,
        })
    }
}

/// Authenticated JSON client for the control plane.
///
/// Cheap to clone; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct QueryClient {
    http: Client,
    base_url: Url,
    auth: Arc<dyn AuthTokenProvider>,
    log_requests: bool,
}

impl QueryClient {
    /// Start a builder from a configuration.
    #[must_use]
    pub fn builder(config: GpuCloudConfig) -> QueryClientBuilder {
        QueryClientBuilder::new(config)
    }

    /// Construct a client from a configuration and a token provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not yield a usable base URL.
    pub fn new(config: GpuCloudConfig, auth: Arc<dyn AuthTokenProvider>) -> Result<Self> {
        QueryClientBuilder::new(config)
            .with_token_provider(auth)
            .build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform one request and return the parsed JSON body.
    ///
    /// `path` is resource-relative (`/dataset/{id}`). An empty success body yields
    /// [`Value::Null`].
    ///
    /// # Errors
    ///
    /// [`Error::Api`] for any non-2xx response, a transport error when the request never
    /// completed and [`Error::ParseError`] when the body is not JSON.
    pub async fn query(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        payload: Option<&Value>,
    ) -> Result<Value> {
        let text = self.execute(method, path, params, payload).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|err| Error::ParseError(format!("Invalid JSON from `{path}`: {err}")))
    }

    /// Perform one request and deserialize the body into `R`.
    ///
    /// # Errors
    ///
    /// Same as [`QueryClient::query`], plus [`Error::ParseError`] on schema mismatch.
    pub async fn query_as<B, R>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let text = self.execute(method, path, params, body).await?;
        serde_json::from_str(&text).map_err(|err| {
            Error::ParseError(format!("Failed to parse response for `{path}`: {err}"))
        })
    }

    /// `GET` a path and deserialize the body.
    ///
    /// # Errors
    ///
    /// Same as [`QueryClient::query_as`].
    pub async fn get<R>(&self, path: &str, params: &[(&'static str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.query_as::<(), R>(Method::GET, path, params, None).await
    }

    /// `DELETE` a path, discarding any body.
    ///
    /// # Errors
    ///
    /// Same as [`QueryClient::query`].
    pub async fn delete(&self, path: &str, params: &[(&'static str, String)]) -> Result<()> {
        self.execute::<()>(Method::DELETE, path, params, None)
            .await
            .map(|_| ())
    }

    /// Fetch a fresh snapshot of `current` from its canonical path.
    ///
    /// The result is a brand-new value; nothing from `current` is carried over.
    ///
    /// # Errors
    ///
    /// Propagates the [`Error`] from the underlying `GET` unchanged.
    pub async fn fetch<R: Resource>(&self, current: &R) -> Result<R> {
        self.get(&current.path(), &[]).await
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        params: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.build_url(path)?;
        let token = self.auth.token().await?;

        if self.log_requests {
            debug!(%method, path = %path, ?params, "Sending API request");
        }

        let mut request = self
            .http
            .request(method.clone(), url)
            .query(params)
            .header("Accept", "application/json")
            .bearer_auth(token.expose_secret());
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        if self.log_requests {
            debug!(%method, path = %path, status = status.as_u16(), "API request failed");
        }
        Err(Error::from_response(status.as_u16(), &text))
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid API path `{path}`: {err}")))
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
