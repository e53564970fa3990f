//! Per-item extraction
//!
//! Turns one stream item (plus its positionally paired actor node) into a
//! [`PostRecord`]. Items that lack a required sub-node are skipped: the
//! stream-item class is shared with UI elements that are not posts.

use super::types::{Cursor, Entries, PostRecord, VideoDescriptor};
use crate::markup::{Fragment, MarkupNode};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

pub const ITEM_SELECTOR: &str = ".stream-item";
pub const ACTOR_SELECTOR: &str = ".js-profile-popup-actionable";
const TEXT_SELECTOR: &str = ".tweet-text";
const TWEET_SELECTOR: &str = ".js-stream-tweet";
const PINNED_SELECTOR: &str = "div.pinned";
const TIMESTAMP_SELECTOR: &str = "._timestamp";
const COUNT_SELECTOR: &str = ".ProfileTweet-actionCount";
const HASHTAG_SELECTOR: &str = ".twitter-hashtag";
const TIMELINE_LINK_SELECTOR: &str = "a.twitter-timeline-link:not(.u-hidden)";
const TEXT_LINK_SELECTOR: &str = "[class='js-tweet-text-container'] a[data-expanded-url]";
const PHOTO_SELECTOR: &str = ".AdaptiveMedia-photoContainer";
const VIDEO_SELECTOR: &str = ".PlayableMedia-player";

static GLUED_HTTP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)http").expect("valid regex"));
static GLUED_PIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)pic\.twitter").expect("valid regex"));

// ============================================================================
// Interaction Counters
// ============================================================================

/// The three interaction counters shown under a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Replies,
    Retweets,
    Likes,
}

/// Positions in the action-count list to read each counter from, in order.
///
/// The endpoint renders compact and expanded action bars depending on
/// layout flags, so the same counter shows up at different indices.
pub const COUNTER_FALLBACKS: [(Counter, &[usize]); 3] = [
    (Counter::Replies, &[0, 3]),
    (Counter::Retweets, &[1, 4, 5]),
    (Counter::Likes, &[2, 6, 7]),
];

impl Counter {
    /// Positions this counter is read from, primary first
    pub fn positions(self) -> &'static [usize] {
        for (counter, positions) in COUNTER_FALLBACKS {
            if counter == self {
                return positions;
            }
        }
        &[]
    }
}

/// Reduce an action-count text to its digits: first word, separators removed
pub fn normalize_counter_token(raw: &str) -> String {
    raw.split_whitespace()
        .next()
        .unwrap_or("")
        .replace([',', '.'], "")
}

/// Read a counter from the action-count texts, walking its fallback positions.
///
/// The first position whose token parses as an integer wins. Missing
/// positions, empty texts and unparsable tokens (`1.2K`) fall through; when
/// nothing matches the counter is 0.
pub fn resolve_counter(counter: Counter, texts: &[String]) -> u64 {
    counter
        .positions()
        .iter()
        .filter_map(|&i| texts.get(i))
        .map(|text| normalize_counter_token(text))
        .filter(|token| !token.is_empty())
        .find_map(|token| token.parse::<u64>().ok())
        .unwrap_or(0)
}

// ============================================================================
// Videos
// ============================================================================

/// Recover a video id from one `background...` style token.
///
/// `background-image:url(.../abc123.jpg)` gives `abc123`; a poster without a
/// `.jpg` or `.png` extension gives `None`.
pub fn video_id_from_token(token: &str) -> Option<String> {
    let name = token.rsplit('/').next().unwrap_or(token);
    [".jpg", ".png"]
        .iter()
        .find_map(|ext| name.find(ext))
        .map(|end| name[..end].to_string())
}

/// One descriptor per background declaration in an inline style
pub fn videos_from_style(style: &str) -> Vec<VideoDescriptor> {
    style
        .split_whitespace()
        .filter(|token| token.starts_with("background"))
        .map(|token| VideoDescriptor {
            id: video_id_from_token(token),
        })
        .collect()
}

// ============================================================================
// Text
// ============================================================================

/// Separate a link preview glued to the preceding word.
///
/// Only the first glued `http` and the first glued `pic.twitter` are fixed.
pub fn fix_glued_links(text: &str) -> String {
    let text = GLUED_HTTP.replacen(text, 1, "${1} http");
    GLUED_PIC.replacen(&text, 1, "${1} pic.twitter").into_owned()
}

// ============================================================================
// Items
// ============================================================================

/// Extract a record from an item node and its actor node.
///
/// Returns `None` when the item is not a post or is missing its id, author
/// handle or timestamp.
pub fn extract_item<N: MarkupNode>(item: &N, actor: &N) -> Option<PostRecord> {
    let item_id = item.attr("data-item-id");

    let Some(text_node) = item.select_one(TEXT_SELECTOR) else {
        debug!(item_id = ?item_id, "Skipping item without body text");
        return None;
    };
    let text = text_node.full_text();

    let Some(tweet_id) = item_id.map(str::to_string) else {
        debug!("Skipping item without an identifier");
        return None;
    };

    let Some(username) = actor.attr("data-screen-name").map(str::to_string) else {
        debug!(%tweet_id, "Skipping item without author handle");
        return None;
    };

    let Some(time) = parse_timestamp(item) else {
        debug!(%tweet_id, "Skipping item without a usable timestamp");
        return None;
    };

    let is_retweet = item
        .select_one(TWEET_SELECTOR)
        .is_some_and(|tweet| tweet.attr_non_empty("data-retweet-id").is_some());

    let counts: Vec<String> = item
        .select_all(COUNT_SELECTOR)
        .iter()
        .map(MarkupNode::clean_text)
        .collect();

    Some(PostRecord {
        tweet_url: actor
            .attr("data-permalink-path")
            .unwrap_or_default()
            .to_string(),
        user_id: actor.attr("data-user-id").unwrap_or_default().to_string(),
        is_retweet,
        is_pinned: item.has(PINNED_SELECTOR),
        time,
        text: fix_glued_links(&text),
        replies: resolve_counter(Counter::Replies, &counts),
        retweets: resolve_counter(Counter::Retweets, &counts),
        likes: resolve_counter(Counter::Likes, &counts),
        entries: extract_entries(item),
        tweet_id,
        username,
    })
}

fn parse_timestamp<N: MarkupNode>(item: &N) -> Option<DateTime<Utc>> {
    let node = item.select_one(TIMESTAMP_SELECTOR)?;
    let millis = node.attr("data-time-ms")?.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp_millis(millis)
}

fn extract_entries<N: MarkupNode>(item: &N) -> Entries {
    let hashtags = item
        .select_all(HASHTAG_SELECTOR)
        .iter()
        .map(MarkupNode::full_text)
        .collect();

    let urls: BTreeSet<String> = item
        .select_all(TIMELINE_LINK_SELECTOR)
        .into_iter()
        .chain(item.select_all(TEXT_LINK_SELECTOR))
        .filter_map(|node| node.attr("data-expanded-url").map(str::to_string))
        .collect();

    let photos = item
        .select_all(PHOTO_SELECTOR)
        .iter()
        .filter_map(|node| node.attr("data-image-url").map(str::to_string))
        .collect();

    let videos = item
        .select_all(VIDEO_SELECTOR)
        .iter()
        .flat_map(|node| videos_from_style(node.attr("style").unwrap_or_default()))
        .collect();

    Entries {
        hashtags,
        urls,
        photos,
        videos,
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Result of extracting one page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Records in page order
    pub records: Vec<PostRecord>,
    /// Identifier of the last raw item, skipped or not
    pub cursor: Option<Cursor>,
    /// Number of stream items on the page
    pub raw_items: usize,
}

impl ParsedPage {
    /// Items that did not produce a record
    pub fn skipped(&self) -> usize {
        self.raw_items.saturating_sub(self.records.len())
    }
}

/// Extract every post from a parsed fragment
pub fn extract_page(fragment: &Fragment) -> ParsedPage {
    let items = fragment.select_all(ITEM_SELECTOR);
    let actors = fragment.select_all(ACTOR_SELECTOR);

    let records = items
        .iter()
        .zip(actors.iter())
        .filter_map(|(item, actor)| extract_item(item, actor))
        .collect();

    let cursor = items
        .last()
        .and_then(|item| item.attr("data-item-id"))
        .map(Cursor::new);

    ParsedPage {
        records,
        cursor,
        raw_items: items.len(),
    }
}

/// Parse and extract a markup fragment.
///
/// Returns `None` if the fragment is not usable markup at all.
pub fn extract_markup(markup: &str) -> Option<ParsedPage> {
    Fragment::parse(markup).map(|fragment| extract_page(&fragment))
}
