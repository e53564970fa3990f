//! Timeline module
//!
//! The incremental extraction pipeline: build the first-page locator, fetch
//! a page, turn each stream item into a [`PostRecord`], and advance with the
//! identifier of the last item until the page budget runs out.
//!
//! # Overview
//!
//! - `TimelineQuery` - what to scrape and how many pages
//! - `Timeline` - pull-based state machine yielding records one at a time
//! - `extract` - per-item field extraction and normalization

pub mod extract;
mod locator;
mod paginator;
mod types;

pub use extract::{Counter, ParsedPage, COUNTER_FALLBACKS};
pub use locator::{build_locator, Locator, FEATURE_PARAMS};
pub use paginator::{RawPage, Timeline, TimelineState, ITEMS_HTML_KEY};
pub use types::{Cursor, Entries, PostRecord, TimelineQuery, VideoDescriptor, HASHTAG_MARKER};
