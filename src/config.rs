//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use crate::cache::MAX_TTL;
use crate::error::{ApiError, Result};

/// API client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// How long a resolved read stays fresh
    pub cache_ttl: Duration,
    /// Per-request network timeout
    pub request_timeout: Duration,
    /// Interval of the optional background sweep of expired entries
    pub sweep_interval: Duration,
    /// Bearer token used by the command-line tool
    pub api_token: Option<String>,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Base URL of the REST API (default: http://localhost:8000)
    /// - `CACHE_TTL_SECS` - Read cache TTL in seconds (default: 30)
    /// - `REQUEST_TIMEOUT_SECS` - Network timeout in seconds (default: 30)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Expired entry sweep frequency (default: 60)
    /// - `API_TOKEN` - Bearer token (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("API_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl: secs_from_env("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
            request_timeout: secs_from_env("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
            sweep_interval: secs_from_env("CACHE_SWEEP_INTERVAL_SECS")
                .unwrap_or(defaults.sweep_interval),
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// Overrides the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Checks that the configuration can back a working client.
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl.is_zero() {
            return Err(ApiError::Config("cache TTL must be greater than zero".into()));
        }
        if self.cache_ttl > MAX_TTL {
            return Err(ApiError::Config(format!(
                "cache TTL of {}s exceeds the maximum of {}s",
                self.cache_ttl.as_secs(),
                MAX_TTL.as_secs()
            )));
        }
        Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        Ok(())
    }
}

fn secs_from_env(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            cache_ttl: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(60),
            api_token: None,
        }
    }
}
