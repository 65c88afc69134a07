//! Client configuration.

use crate::ClientError;
use bazaar_auth::DEFAULT_TOKEN_KEY;
use bazaar_commerce::Currency;
use bazaar_data::DEFAULT_ENVELOPE_FIELD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides [`ClientConfig::api_base_url`].
pub const API_URL_ENV: &str = "BAZAAR_API_URL";

/// Storefront client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every REST call is made against.
    pub api_base_url: String,
    /// Storage key of the bearer token.
    pub token_key: String,
    /// Field enveloped list responses carry their array under.
    pub envelope_field: String,
    /// Request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
    /// Currency wire prices are interpreted in.
    pub currency: String,
    /// Directory for persisted storage. In-memory when unset.
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            envelope_field: DEFAULT_ENVELOPE_FIELD.to_string(),
            timeout_secs: 30,
            currency: Currency::default().code().to_string(),
            storage_path: None,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ClientError> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Load config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides.
    pub fn with_env(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    /// Request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Configured currency.
    pub fn currency(&self) -> Result<Currency, ClientError> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| ClientError::Config(format!("unknown currency `{}`", self.currency)))
    }

    /// Check the config before use.
    pub fn validate(&self) -> Result<(), ClientError> {
        url::Url::parse(&self.api_base_url)
            .map_err(|e| ClientError::Config(format!("api_base_url: {}", e)))?;
        if self.token_key.trim().is_empty() {
            return Err(ClientError::Config("token_key must not be empty".to_string()));
        }
        if self.envelope_field.trim().is_empty() {
            return Err(ClientError::Config("envelope_field must not be empty".to_string()));
        }
        self.currency()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.token_key, "token");
        assert_eq!(config.envelope_field, "data");
        assert_eq!(config.currency().unwrap(), Currency::INR);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = ClientConfig::from_toml_str(
            r#"
            api_base_url = "https://shop.example.com/api"
            envelope_field = "items"
            timeout_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert_eq!(config.envelope_field, "items");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = ClientConfig::from_toml_str("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_api_url_override() {
        let config = ClientConfig::default()
            .with_api_url_override(Some(" https://staging.example.com ".to_string()));
        assert_eq!(config.api_base_url, "https://staging.example.com");

        let config = ClientConfig::default().with_api_url_override(Some("".to_string()));
        assert_eq!(config.api_base_url, ClientConfig::default().api_base_url);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.currency = "XYZ".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
