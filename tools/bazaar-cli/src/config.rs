//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use bazaar_client::ClientConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Generate a default bazaar.toml config file.
pub fn generate_default_config(api_base_url: &str) -> String {
    format!(
        r#"# Bazaar storefront configuration

[client]
api_base_url = "{api_base_url}"
token_key = "token"
envelope_field = "data"
timeout_secs = 30
currency = "INR"
# storage_path = ".bazaar"
"#,
        api_base_url = api_base_url
    )
}
