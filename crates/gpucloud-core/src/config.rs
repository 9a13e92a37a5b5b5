//! Configuration structures for GpuCloud clients.
//!
//! The configuration is plain data: where the API lives and how long to wait on the wire.
//! Credentials come from an [`AuthTokenProvider`](crate::auth::AuthTokenProvider) and are
//! never part of it.

use crate::types::DEFAULT_API_HOST;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a GpuCloud client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GpuCloudConfig {
    /// API host name; requests go to `https://{api_host}`
    #[validate(length(min = 1))]
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Full base URL overriding `api_host` (self-hosted control planes, test servers)
    #[validate(url)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

impl GpuCloudConfig {
    /// Create a configuration for the given API host.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn new(api_host: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            api_host: api_host.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Create a configuration pointing at an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            api_url: Some(base_url.into()),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Resolve the base URL all request paths are joined onto.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(&self) -> Result<Url, Error> {
        let raw = match &self.api_url {
            Some(url) => url.clone(),
            None => format!("https://{}", self.api_host),
        };
        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid API URL `{raw}`: {e}")))
    }
}

impl Default for GpuCloudConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
