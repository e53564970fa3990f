//! HTTP session used by one scraping run
//!
//! Wraps a single `reqwest::Client` so that every page of a run shares
//! connections, cookies and proxy routing, while separate runs never share
//! anything. Requests are never retried: transport failures end the run.

use super::rate_limit::RateLimiter;
use crate::config::{ProxyConfig, RateLimitConfig, ScraperConfig};
use crate::error::{Error, Result};
use crate::types::StringMap;
use async_trait::async_trait;
use reqwest::{Client, Proxy, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Query parameter carrying the pagination cursor
pub const MAX_POSITION_PARAM: &str = "max_position";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Proxy routing
    pub proxy: Option<ProxyConfig>,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimitConfig>,
    /// User agent string, overridden by an explicit `User-Agent` header
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            proxy: None,
            rate_limit: None,
            user_agent: format!("timeline-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Derive the client settings from a scraper config
    pub fn from_scraper_config(config: &ScraperConfig) -> Self {
        let mut builder = Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .proxy(config.proxy.clone());
        if let Some(rate_limit) = &config.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set proxy routing
    pub fn proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.config.proxy = proxy;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add every header from a map
    #[must_use]
    pub fn headers(mut self, headers: &StringMap) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// One network round-trip for a page of markup
///
/// Implemented by [`HttpClient`]; the timeline only depends on this seam so
/// that a run owns exactly one fetcher and tests can substitute canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `locator`, appending the cursor as `max_position` when present,
    /// and return the raw response body
    async fn fetch(&self, locator: &str, headers: &StringMap, cursor: Option<&str>)
        -> Result<String>;
}

/// HTTP client owning one connection pool
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy) = &config.proxy {
            if let Some(url) = &proxy.http {
                builder = builder.proxy(Proxy::http(url)?);
            }
            if let Some(url) = &proxy.https {
                builder = builder.proxy(Proxy::https(url)?);
            }
        }

        let client = builder.build()?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Make a GET request with config
    ///
    /// Any HTTP status is returned as a response; only transport failures
    /// are errors.
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Response> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url);

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        match req.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    debug!("Request succeeded: GET {} ({})", url, status.as_u16());
                } else {
                    warn!("GET {} returned HTTP {}", url, status.as_u16());
                }
                Ok(response)
            }
            Err(e) if e.is_timeout() => Err(Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }),
            Err(e) => Err(Error::Http(e)),
        }
    }

    /// Make a GET request and read the body as text
    pub async fn get_text(&self, url: &str, config: RequestConfig) -> Result<String> {
        let response = self.get_with_config(url, config).await?;
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(
        &self,
        locator: &str,
        headers: &StringMap,
        cursor: Option<&str>,
    ) -> Result<String> {
        let mut config = RequestConfig::new().headers(headers);
        if let Some(cursor) = cursor {
            config = config.query(MAX_POSITION_PARAM, cursor);
        }
        self.get_text(locator, config).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
