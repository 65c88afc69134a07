//! Bearer token persistence.

use crate::AuthError;
use bazaar_cache::Cache;

/// Key the bearer token is stored under unless configured otherwise.
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Reads and writes the bearer token in persisted client storage.
#[derive(Debug, Clone)]
pub struct TokenStore {
    cache: Cache,
    key: String,
}

impl TokenStore {
    /// Store the token under [`DEFAULT_TOKEN_KEY`].
    pub fn new(cache: Cache) -> Self {
        Self::with_key(cache, DEFAULT_TOKEN_KEY)
    }

    /// Store the token under a custom key.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// The stored token, if any. Blank tokens count as absent.
    pub fn load(&self) -> Result<Option<String>, AuthError> {
        let token: Option<String> = self.cache.get(&self.key)?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    /// The stored token, or [`AuthError::NotLoggedIn`].
    pub fn require(&self) -> Result<String, AuthError> {
        self.load()?.ok_or(AuthError::NotLoggedIn)
    }

    /// Persist a token, replacing any previous one.
    pub fn save(&self, token: &str) -> Result<(), AuthError> {
        self.cache.set(&self.key, &token)?;
        tracing::debug!(key = %self.key, "stored bearer token");
        Ok(())
    }

    /// Forget the token.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.cache.delete(&self.key)?;
        Ok(())
    }
}
