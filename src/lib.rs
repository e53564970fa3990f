// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Timeline Scraper
//!
//! Incremental extraction of posts from the server-rendered timeline feed of
//! a legacy social web frontend.
//!
//! ## Features
//!
//! - **Lazy Pagination**: records are pulled one at a time, pages are fetched on demand
//! - **Hashtag & Profile Timelines**: `#tag` searches or a user's own timeline
//! - **Resilient Extraction**: non-post entries are skipped, counters fall back across layouts
//! - **Profiles & Trends**: single-shot profile header and trending topic extraction
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use timeline_scraper::{get_tweets, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut tweets = Box::pin(get_tweets("#rustlang", 2, None)?);
//!     while let Some(tweet) = tweets.next().await {
//!         let tweet = tweet?;
//!         println!("@{}: {}", tweet.username, tweet.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Scraper / get_tweets                      │
//! │  tweets(query) → Timeline    profile(user)    trends()       │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬─────────────────┴──────┬──────────────┬──────────┐
//! │   HTTP    │       Timeline         │   Extract    │  Markup  │
//! ├───────────┼────────────────────────┼──────────────┼──────────┤
//! │ Session   │ Fetching → Emitting    │ Counters     │ Selectors│
//! │ Headers   │ Cursor = last item id  │ Entities     │ Attrs    │
//! │ Proxy     │ Done / Failed          │ Text fixups  │ Text     │
//! └───────────┴────────────────────────┴──────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Scraper configuration
pub mod config;

/// HTTP session, headers and pacing
pub mod http;

/// Typed accessors over parsed markup
pub mod markup;

/// Timeline pagination and post extraction
pub mod timeline;

/// Profile header extraction
pub mod profile;

/// Trending topics
pub mod trends;

/// Caller-facing entry points
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{get_profile, get_trends, get_tweets, Scraper};
pub use config::{ProxyConfig, ScraperConfig};
pub use error::{Error, Result};
pub use profile::Profile;
pub use timeline::{Entries, PostRecord, Timeline, TimelineQuery, VideoDescriptor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
