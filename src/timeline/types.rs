//! Timeline types
//!
//! Input query, emitted records and the pagination cursor.

use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Leading character that turns a query into a hashtag search
pub const HASHTAG_MARKER: char = '#';

// ============================================================================
// Query
// ============================================================================

/// What to scrape and how many pages to walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
    /// Hashtag (leading `#`) or profile handle
    pub query: String,
    /// Page budget, at least 1
    pub pages: u32,
    /// Proxy routing for this run, overriding the scraper config
    pub proxy: Option<ProxyConfig>,
}

impl TimelineQuery {
    /// Create a query with the default budget of one page
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pages: 1,
            proxy: None,
        }
    }

    /// Set the page budget
    #[must_use]
    pub fn pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Set the proxy routing
    #[must_use]
    pub fn proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Whether this is a hashtag search rather than a profile timeline
    pub fn is_hashtag(&self) -> bool {
        self.query.starts_with(HASHTAG_MARKER)
    }

    /// Validate the query
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::invalid_value("query", "must not be empty"));
        }
        if self.pages == 0 {
            return Err(Error::invalid_value("pages", "must be at least 1"));
        }
        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Records
// ============================================================================

/// One post scraped from a timeline page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Post identifier
    pub tweet_id: String,
    /// Permalink path, e.g. `/jack/status/20`
    pub tweet_url: String,
    /// Author handle
    pub username: String,
    /// Author identifier
    pub user_id: String,
    /// Whether the entry is a repost of someone else's post
    pub is_retweet: bool,
    /// Whether the entry is pinned to the top of the profile
    pub is_pinned: bool,
    /// Creation time
    pub time: DateTime<Utc>,
    /// Body text, with glued link previews separated
    pub text: String,
    /// Reply count
    pub replies: u64,
    /// Retweet count
    pub retweets: u64,
    /// Like count
    pub likes: u64,
    /// Entities found in the post
    pub entries: Entries,
}

/// Entities attached to a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entries {
    /// Hashtags in order of appearance, duplicates kept
    pub hashtags: Vec<String>,
    /// Expanded link targets, deduplicated
    pub urls: BTreeSet<String>,
    /// Photo URLs
    pub photos: Vec<String>,
    /// Embedded videos
    pub videos: Vec<VideoDescriptor>,
}

/// An embedded video, identified by its poster image name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    /// Identifier recovered from the poster image, if it had a known extension
    pub id: Option<String>,
}

// ============================================================================
// Cursor
// ============================================================================

/// Pagination token: the identifier of the last item on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw item identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The token as sent in the query string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
