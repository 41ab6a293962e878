//! Authentication handle passed through to upserts.

use async_trait::async_trait;

use crate::error::{IndexerError, Result};

/// Environment variable read by [`StaticTokenProvider::from_env`].
pub const ACCESS_TOKEN_ENV: &str = "VSEARCH_ACCESS_TOKEN";

/// Supplies OAuth access tokens for calls to the vector index.
///
/// Token acquisition and refresh belong to the implementation; the indexer
/// only forwards the handle to its [`Upserter`](crate::Upserter).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// A [`TokenProvider`] that always returns the same token.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Read the token from the `VSEARCH_ACCESS_TOKEN` environment variable.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            IndexerError::AuthError(format!("{ACCESS_TOKEN_ENV} environment variable not set"))
        })?;
        if token.trim().is_empty() {
            return Err(IndexerError::AuthError(format!("{ACCESS_TOKEN_ENV} is empty")));
        }
        Ok(Self::new(token))
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
