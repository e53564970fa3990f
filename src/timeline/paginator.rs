//! Pull-based pagination over a timeline
//!
//! A [`Timeline`] walks the pages of one query. Each call to
//! [`Timeline::next`] yields at most one record and performs at most one
//! fetch; nothing is fetched ahead of the caller.

use super::extract::{extract_markup, ParsedPage};
use super::locator::{build_locator, Locator};
use super::types::{Cursor, PostRecord, TimelineQuery};
use crate::error::{Error, Result};
use crate::http::{get_headers, PageFetcher};
use crate::types::{JsonValue, StringMap};
use futures::Stream;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// JSON key holding the rendered item list
pub const ITEMS_HTML_KEY: &str = "items_html";

// ============================================================================
// Raw Page
// ============================================================================

/// A fetched page before markup parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// The markup fragment, `None` if the field was not a string
    pub fragment: Option<String>,
}

impl RawPage {
    /// Decode a response body.
    ///
    /// A body that is not a JSON object carrying the markup key is the
    /// endpoint's way of saying the resource does not exist.
    pub fn from_body(body: &str, target: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(body).map_err(|e| {
            debug!("Response for '{}' is not JSON: {}", target, e);
            Error::profile_unavailable(target)
        })?;

        match value.get(ITEMS_HTML_KEY) {
            Some(JsonValue::String(fragment)) => Ok(Self {
                fragment: Some(fragment.clone()),
            }),
            Some(_) => Ok(Self { fragment: None }),
            None => Err(Error::profile_unavailable(target)),
        }
    }

    /// Parse and extract the fragment; `None` if it is not usable markup
    pub fn extract(&self) -> Option<ParsedPage> {
        self.fragment.as_deref().and_then(extract_markup)
    }
}

// ============================================================================
// Timeline
// ============================================================================

/// Where a timeline is in its fetch/emit cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineState {
    /// The next pull fetches a page, with the cursor if this is not the first
    Fetching { cursor: Option<Cursor> },
    /// Records of the current page are being handed out; afterwards fetch
    /// with `next_cursor`, or finish if there is none
    Emitting { next_cursor: Option<Cursor> },
    /// Finished without error
    Done,
    /// Finished after surfacing an error
    Failed,
}

/// Lazy sequence of posts for one query
pub struct Timeline {
    fetcher: Box<dyn PageFetcher>,
    locator: Locator,
    headers: StringMap,
    target: String,
    remaining_pages: u32,
    pages_fetched: u32,
    buffer: VecDeque<PostRecord>,
    state: TimelineState,
}

impl Timeline {
    /// Create a timeline for `query`, fetching through `fetcher`.
    ///
    /// The fetcher is owned by this run alone.
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        base_url: &str,
        query: &TimelineQuery,
    ) -> Result<Self> {
        query.validate()?;

        let locator = build_locator(base_url, query);
        let headers = get_headers(&locator.referer_path);

        info!(
            "Starting timeline for '{}' ({} page{})",
            query.query,
            query.pages,
            if query.pages == 1 { "" } else { "s" }
        );

        Ok(Self {
            fetcher,
            locator,
            headers,
            target: query.query.clone(),
            remaining_pages: query.pages,
            pages_fetched: 0,
            buffer: VecDeque::new(),
            state: TimelineState::Fetching { cursor: None },
        })
    }

    /// Send `agent` instead of the browser user agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.headers.insert("User-Agent".to_string(), agent.into());
        self
    }

    /// URL of the first page
    pub fn locator(&self) -> &str {
        &self.locator.url
    }

    /// Headers sent with every page of this run
    pub fn headers(&self) -> &StringMap {
        &self.headers
    }

    /// Current state
    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Pages left in the budget
    pub fn remaining_pages(&self) -> u32 {
        self.remaining_pages
    }

    /// Whether the sequence has ended
    pub fn is_finished(&self) -> bool {
        matches!(self.state, TimelineState::Done | TimelineState::Failed)
    }

    /// Pull the next record.
    ///
    /// Returns `None` once the sequence has ended. An error is yielded once,
    /// after which the sequence is over.
    pub async fn next(&mut self) -> Option<Result<PostRecord>> {
        loop {
            match std::mem::replace(&mut self.state, TimelineState::Done) {
                TimelineState::Emitting { next_cursor } => {
                    if let Some(record) = self.buffer.pop_front() {
                        self.state = TimelineState::Emitting { next_cursor };
                        return Some(Ok(record));
                    }
                    self.state = match next_cursor {
                        Some(cursor) => TimelineState::Fetching {
                            cursor: Some(cursor),
                        },
                        None => TimelineState::Done,
                    };
                }
                TimelineState::Fetching { cursor } => {
                    match self.fetch_page(cursor.as_ref()).await {
                        Ok(Some(page)) => self.accept_page(page),
                        Ok(None) => {
                            debug!("Malformed fragment for '{}', ending timeline", self.target);
                            self.state = TimelineState::Done;
                        }
                        Err(e) => {
                            if e.is_unavailable() {
                                warn!("Timeline for '{}' is unavailable", self.target);
                            }
                            self.state = TimelineState::Failed;
                            return Some(Err(e));
                        }
                    }
                }
                TimelineState::Done => return None,
                TimelineState::Failed => {
                    self.state = TimelineState::Failed;
                    return None;
                }
            }
        }
    }

    /// Collect every remaining record, stopping at the first error
    pub async fn collect_all(&mut self) -> Result<Vec<PostRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record?);
        }
        Ok(records)
    }

    /// Turn the timeline into a `Stream` of records
    pub fn into_stream(self) -> impl Stream<Item = Result<PostRecord>> + Send {
        futures::stream::unfold(self, |mut timeline| async move {
            timeline.next().await.map(|item| (item, timeline))
        })
    }

    async fn fetch_page(&mut self, cursor: Option<&Cursor>) -> Result<Option<ParsedPage>> {
        let body = self
            .fetcher
            .fetch(&self.locator.url, &self.headers, cursor.map(Cursor::as_str))
            .await?;
        self.pages_fetched += 1;

        let raw = RawPage::from_body(&body, &self.target)?;
        Ok(raw.extract())
    }

    fn accept_page(&mut self, page: ParsedPage) {
        self.remaining_pages = self.remaining_pages.saturating_sub(1);

        debug!(
            page = self.pages_fetched,
            raw_items = page.raw_items,
            emitted = page.records.len(),
            skipped = page.skipped(),
            cursor = ?page.cursor,
            "Parsed timeline page"
        );

        let next_cursor = if self.remaining_pages > 0 {
            page.cursor
        } else {
            None
        };

        self.buffer.extend(page.records);
        self.state = TimelineState::Emitting { next_cursor };
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("locator", &self.locator)
            .field("target", &self.target)
            .field("remaining_pages", &self.remaining_pages)
            .field("pages_fetched", &self.pages_fetched)
            .field("buffered", &self.buffer.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
