//! Endpoint locators for the first page of a run
//!
//! Later pages reuse the same locator with the cursor appended.

use super::types::TimelineQuery;

/// Flags the endpoint needs to answer with markup-bearing JSON
pub const FEATURE_PARAMS: &str =
    "include_available_features=1&include_entities=1&include_new_items_bar=true";

/// Where to fetch a timeline from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Full URL of the first page
    pub url: String,
    /// Path component for the `Referer` header
    pub referer_path: String,
}

/// Build the locator for a query against `base_url`
pub fn build_locator(base_url: &str, query: &TimelineQuery) -> Locator {
    let base = base_url.trim_end_matches('/');

    if query.is_hashtag() {
        let encoded = urlencoding::encode(&query.query).into_owned();
        Locator {
            url: format!(
                "{base}/i/search/timeline?f=tweets&vertical=default&q={encoded}&src=tyah&reset_error_state=false&{FEATURE_PARAMS}"
            ),
            referer_path: encoded,
        }
    } else {
        Locator {
            url: format!(
                "{base}/i/profiles/show/{}/timeline/tweets?{FEATURE_PARAMS}",
                query.query
            ),
            referer_path: query.query.clone(),
        }
    }
}
