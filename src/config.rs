use std::time::Duration;

use anyhow::{Context, Result};
use validator::Validate;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Where the forecast service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ClientConfig {
    #[validate(url)]
    pub api_url: String,
    /// Model fitting can take a while, so the default is generous
    #[validate(range(min = 1, max = 3600))]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self> {
        let config = Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout_secs,
        };
        config
            .validate()
            .with_context(|| format!("Invalid client configuration for '{}'", api_url))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_url, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("http://forecast.local:8000/", 30).unwrap();
        assert_eq!(config.api_url, "http://forecast.local:8000");
        assert_eq!(config.url("/health"), "http://forecast.local:8000/health");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_new_rejects_invalid_values() {
        assert!(ClientConfig::new("not a url", 30).is_err());
        assert!(ClientConfig::new(DEFAULT_API_URL, 0).is_err());
    }

    #[test]
    fn test_default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
