//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Backend used when `NMT_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout used when `NMT_TIMEOUT_MS` is unset
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("NMT_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_ms = std::env::var("NMT_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()?;

        let config = Self {
            base_url,
            timeout_ms,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(anyhow::anyhow!("API base URL is required"));
        }

        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "API base URL must start with http:// or https://, got {}",
                base
            ));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    /// Timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute URL for an API path such as `/api/v1/health`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("localhost:8000").validate().is_err());

        let config = ClientConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = ClientConfig::new("http://example.com/");
        assert_eq!(
            config.endpoint("/api/v1/translate"),
            "http://example.com/api/v1/translate"
        );
        let config = ClientConfig::new("http://example.com/prefix");
        assert_eq!(
            config.endpoint("api/v1/health"),
            "http://example.com/prefix/api/v1/health"
        );
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");

        let config = ClientConfig {
            base_url: "https://nmt.example.org".to_string(),
            timeout_ms: 5000,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        assert_eq!(ClientConfig::from_file(&path).unwrap(), config);
    }
}
