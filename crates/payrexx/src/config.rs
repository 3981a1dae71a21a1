//! # Payrexx Configuration
//!
//! Configuration management for the Payrexx client.
//! Credentials are loaded from environment variables.

use payrexx_core::{PayrexxError, PayrexxResult};
use std::env;

/// Default REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.payrexx.com/v1.0/";

/// Default per-request timeout applied by the reqwest transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Payrexx API configuration
#[derive(Clone)]
pub struct PayrexxConfig {
    /// Instance name (the `xyz` of `xyz.payrexx.com`)
    pub instance: String,

    /// API secret of the instance
    pub secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PayrexxConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYREXX_INSTANCE`
    /// - `PAYREXX_API_SECRET`
    ///
    /// Optional:
    /// - `PAYREXX_API_BASE_URL`
    /// - `PAYREXX_TIMEOUT_SECS`
    pub fn from_env() -> PayrexxResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let instance = required_var("PAYREXX_INSTANCE")?;
        let secret = required_var("PAYREXX_API_SECRET")?;

        let api_base_url =
            env::var("PAYREXX_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("PAYREXX_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                PayrexxError::Configuration(format!(
                    "PAYREXX_TIMEOUT_SECS must be a number of seconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            instance,
            secret,
            api_base_url,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values
    pub fn new(instance: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            secret: secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Reject empty credentials and non-http base URLs
    pub fn validate(&self) -> PayrexxResult<()> {
        if self.instance.trim().is_empty() {
            return Err(PayrexxError::Configuration(
                "instance must not be empty".to_string(),
            ));
        }
        if self.secret.is_empty() {
            return Err(PayrexxError::Configuration(
                "API secret must not be empty".to_string(),
            ));
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(PayrexxError::Configuration(format!(
                "API base URL must be http(s), got {}",
                self.api_base_url
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PayrexxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayrexxConfig")
            .field("instance", &self.instance)
            .field("secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn required_var(name: &str) -> PayrexxResult<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(PayrexxError::Configuration(format!("{} not set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PayrexxConfig::new("demo", "s3cr3t");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(PayrexxConfig::new("", "s3cr3t").validate().is_err());
        assert!(PayrexxConfig::new("demo", "").validate().is_err());
        assert!(PayrexxConfig::new("demo", "s3cr3t")
            .with_api_base_url("ftp://api.payrexx.com/")
            .validate()
            .is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = PayrexxConfig::new("demo", "s3cr3t");
        let printed = format!("{:?}", config);
        assert!(printed.contains("demo"));
        assert!(!printed.contains("s3cr3t"));
    }

    #[test]
    fn test_from_env_missing_instance() {
        // Empty rather than removed: a local .env must not fill them back in
        env::set_var("PAYREXX_INSTANCE", "");
        env::set_var("PAYREXX_API_SECRET", "");

        let result = PayrexxConfig::from_env();
        assert!(matches!(result, Err(PayrexxError::Configuration(_))));
    }
}
