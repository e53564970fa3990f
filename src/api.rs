//! Caller-facing entry points
//!
//! [`Scraper`] holds the shared configuration and hands out independent runs:
//! every timeline, profile or trends call builds its own HTTP session.

use crate::config::{ProxyConfig, ScraperConfig};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::profile::{fetch_profile, Profile};
use crate::timeline::{PostRecord, Timeline, TimelineQuery};
use crate::trends::fetch_trends;
use futures::Stream;

/// Entry point for scraping the legacy frontend
#[derive(Debug, Clone, Default)]
pub struct Scraper {
    config: ScraperConfig,
}

impl Scraper {
    /// Create a scraper from a validated config
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Start a lazy timeline run for `query`.
    ///
    /// Nothing is fetched until the first record is pulled.
    pub fn tweets(&self, query: &TimelineQuery) -> Result<Timeline> {
        let client = self.session(query.proxy.as_ref())?;
        let timeline = Timeline::new(Box::new(client), self.config.base(), query)?;
        Ok(match &self.config.user_agent {
            Some(agent) => timeline.with_user_agent(agent.as_str()),
            None => timeline,
        })
    }

    /// Fetch the profile header of `username`
    pub async fn profile(&self, username: &str) -> Result<Profile> {
        let client = self.session(None)?;
        fetch_profile(
            &client,
            self.config.base(),
            username,
            self.config.user_agent.as_deref(),
        )
        .await
    }

    /// Fetch the current trending topics
    pub async fn trends(&self) -> Result<Vec<String>> {
        let client = self.session(None)?;
        fetch_trends(&client, self.config.base(), self.config.user_agent.as_deref()).await
    }

    fn session(&self, proxy: Option<&ProxyConfig>) -> Result<HttpClient> {
        let mut config = HttpClientConfig::from_scraper_config(&self.config);
        if let Some(proxy) = proxy {
            config.proxy = Some(proxy.clone());
        }
        HttpClient::with_config(config)
    }
}

/// Lazily stream posts for a hashtag (`#tag`) or profile handle.
///
/// Walks at most `pages` pages. The stream yields
/// [`Error::ProfileUnavailable`](crate::Error::ProfileUnavailable) if the
/// target does not exist.
pub fn get_tweets(
    query: &str,
    pages: u32,
    proxy: Option<ProxyConfig>,
) -> Result<impl Stream<Item = Result<PostRecord>> + Send> {
    let query = TimelineQuery::new(query).pages(pages).proxy(proxy);
    let timeline = Scraper::default().tweets(&query)?;
    Ok(timeline.into_stream())
}

/// Fetch the profile header of `username` with the default config
pub async fn get_profile(username: &str) -> Result<Profile> {
    Scraper::default().profile(username).await
}

/// Fetch the current trending topics with the default config
pub async fn get_trends() -> Result<Vec<String>> {
    Scraper::default().trends().await
}
