//! Pipeline configuration
//!
//! Loads the base URL and transport timeout from environment variables,
//! with a `.env` bootstrap for development setups.
//!
//! ## Environment Variables
//! - `VAULTVIEW_API_URL`: base URL for the API (required)
//! - `VAULTVIEW_API_TIMEOUT_MS`: transport timeout in milliseconds
//!   (optional, defaults to the fixed domain constant)

use std::time::Duration;

use url::Url;
use vaultview_domain::constants::REQUEST_TIMEOUT_MS;

use crate::http::errors::ApiError;

/// Configuration for the request pipeline.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every request path is appended to
    /// (e.g. `https://api.vaultview.dev/v1`).
    pub base_url: String,
    /// Transport timeout for each request.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }
}

impl ApiClientConfig {
    /// Create a config with the given base URL and the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Load configuration from environment variables.
    ///
    /// Loads `.env` first so local development picks up the same variables.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if `VAULTVIEW_API_URL` is missing or not
    /// a valid URL, or if `VAULTVIEW_API_TIMEOUT_MS` is present but not a
    /// number.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let base_url = env_var("VAULTVIEW_API_URL")?;
        Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("Invalid VAULTVIEW_API_URL: {e}")))?;

        let timeout = match std::env::var("VAULTVIEW_API_TIMEOUT_MS") {
            Ok(raw) => {
                let millis = raw.parse::<u64>().map_err(|e| {
                    ApiError::Config(format!("Invalid VAULTVIEW_API_TIMEOUT_MS: {e}"))
                })?;
                Duration::from_millis(millis)
            }
            Err(_) => Duration::from_millis(REQUEST_TIMEOUT_MS),
        };

        Ok(Self { base_url, timeout })
    }
}

fn env_var(name: &str) -> Result<String, ApiError> {
    std::env::var(name)
        .map_err(|_| ApiError::Config(format!("Missing environment variable: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_matches_domain_constant() {
        let config = ApiClientConfig::default();
        assert_eq!(config.timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn new_keeps_default_timeout() {
        let config = ApiClientConfig::new("https://api.example.com");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_millis(REQUEST_TIMEOUT_MS));
    }
}
