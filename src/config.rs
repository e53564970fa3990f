//! Scraper configuration
//!
//! Settings shared by every run: where the legacy frontend lives, how long a
//! request may take, which proxies to route through and optional client-side
//! request pacing. Loaded from YAML, with a couple of environment overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable overriding [`ScraperConfig::base_url`]
pub const ENV_BASE_URL: &str = "TIMELINE_SCRAPER_BASE_URL";

/// Environment variable setting a proxy for both schemes
pub const ENV_PROXY: &str = "TIMELINE_SCRAPER_PROXY";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete scraper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL of the legacy web frontend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Overrides the User-Agent header sent with every request
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Proxy routing
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,

    /// Client-side request pacing
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

fn default_base_url() -> String {
    "https://twitter.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            proxy: None,
            rate_limit: None,
        }
    }
}

impl ScraperConfig {
    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_PROXY).ok(),
        )
    }

    /// Apply explicit base URL and proxy overrides
    #[must_use]
    pub fn with_overrides(mut self, base_url: Option<String>, proxy: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|s| !s.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(proxy) = proxy.filter(|s| !s.is_empty()) {
            self.proxy = Some(ProxyConfig::all(proxy));
        }
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the proxy configuration
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }

        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Proxy Config
// ============================================================================

/// Proxy URLs keyed by the scheme of the target request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy for `http://` targets
    #[serde(default)]
    pub http: Option<String>,

    /// Proxy for `https://` targets
    #[serde(default)]
    pub https: Option<String>,
}

impl ProxyConfig {
    /// Route both schemes through the same proxy
    pub fn all(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            http: Some(url.clone()),
            https: Some(url),
        }
    }

    /// Check that every configured proxy URL parses
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("proxy.http", &self.http), ("proxy.https", &self.https)] {
            if let Some(url) = value {
                Url::parse(url).map_err(|e| Error::invalid_value(field, e.to_string()))?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Rate Limit Config
// ============================================================================

/// Client-side request pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,

    /// Burst size (max tokens in bucket)
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_burst() -> u32 {
    1
}
