//! Bearer token capability.
//!
//! Acquiring and refreshing credentials happens elsewhere; the query layer only asks for
//! a token right before each request.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};

/// Supplies a bearer token on demand.
///
/// Implementations may refresh transparently; callers never cache the returned token.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AuthTokenProvider: Send + Sync {
    /// Returns a token valid for the next request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthError`] if no token can be produced.
    async fn token(&self) -> Result<SecretString>;
}

/// A fixed token, e.g. taken from the environment by the caller.
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    /// Wrap a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl AuthTokenProvider for StaticToken {
    async fn token(&self) -> Result<SecretString> {
        Ok(SecretString::from(self.token.expose_secret().to_owned()))
    }
}

/// Provider used when no credentials were configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

#[async_trait::async_trait]
impl AuthTokenProvider for NoToken {
    async fn token(&self) -> Result<SecretString> {
        Err(Error::AuthError("no token provider configured".to_string()))
    }
}
