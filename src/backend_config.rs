//! # Backend Configuration Module
//!
//! Configuration for the REST backend that serves reference catalogs and
//! stores variants, including retry settings for transient failures.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

// Constants for backend configuration
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_BASE_URL: &str = "BACKOFFICE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "BACKOFFICE_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "BACKOFFICE_MAX_RETRIES";

/// Retry configuration for backend requests
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryConfig {
    /// Maximum number of retry attempts after the first request
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 500,  // 0.5 seconds
            max_retry_delay_ms: 5000,  // 5 seconds
        }
    }
}

/// Configuration structure for the backend client
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the back-office API, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retry settings
    pub recovery: RecoveryConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            recovery: RecoveryConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Read configuration from the environment, keeping defaults for unset values
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.recovery.max_retries = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MAX_RETRIES} must be a non-negative integer"))?;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for an API path such as `"inventory"`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.recovery.max_retries, 3);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://backoffice.example.com/api/"),
            (ENV_TIMEOUT_SECS, "30"),
            (ENV_MAX_RETRIES, "0"),
        ]
        .into_iter()
        .collect();
        let config = BackendConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "https://backoffice.example.com/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.recovery.max_retries, 0);
        assert_eq!(
            config.endpoint("/recipe-variants"),
            "https://backoffice.example.com/api/recipe-variants"
        );
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let result =
            BackendConfig::from_lookup(|k| (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(result.is_err());
    }
}
