//! Profile module
//!
//! Single-shot extraction of a user's profile header from their profile page.

use crate::error::{Error, Result};
use crate::http::{get_headers_with_agent, HttpClient, RequestConfig};
use crate::markup::{Fragment, MarkupNode};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Profile header of one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name, taken from the page title
    pub name: Option<String>,
    /// Handle the profile was requested for
    pub username: String,
    /// Birth date as rendered, without the `Born ` prefix
    pub birthday: Option<String>,
    /// Bio text, whitespace collapsed
    pub biography: Option<String>,
    /// Free-form location
    pub location: Option<String>,
    /// Website shown in the header card
    pub website: Option<String>,
    /// Avatar image URL
    pub profile_photo: Option<String>,
    /// Banner image URL
    pub banner_photo: Option<String>,
    /// Liked posts
    pub likes_count: Option<u64>,
    /// Posted tweets
    pub tweets_count: Option<u64>,
    /// Followers
    pub followers_count: Option<u64>,
    /// Accounts followed
    pub following_count: Option<u64>,
    /// Carries the verified badge
    pub is_verified: bool,
    /// Carries the protected badge
    pub is_private: bool,
    /// Numeric user id from the profile nav
    pub user_id: Option<String>,
}

/// Fetch and parse the profile page of `username`.
///
/// `user_agent` replaces the browser user agent of the header set.
pub async fn fetch_profile(
    client: &HttpClient,
    base_url: &str,
    username: &str,
    user_agent: Option<&str>,
) -> Result<Profile> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), username);
    info!("Fetching profile for '{}'", username);

    let body = client
        .get_text(
            &url,
            RequestConfig::new().headers(&get_headers_with_agent(username, user_agent)),
        )
        .await?;

    parse_profile(username, &body)
}

/// Parse a profile page.
///
/// The frontend answers a missing user with a small JSON error object
/// instead of a page.
pub fn parse_profile(username: &str, body: &str) -> Result<Profile> {
    if let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(body) {
        debug!(
            "Profile response for '{}' is a JSON message: {:?}",
            username,
            map.get("message")
        );
        return Err(Error::profile_unavailable(username));
    }

    let page =
        Fragment::parse_document(body).ok_or_else(|| Error::profile_unavailable(username))?;

    Ok(Profile {
        name: page
            .select_one("title")
            .map(|title| display_name(&title.clean_text()))
            .filter(|name| !name.is_empty()),
        username: username.to_string(),
        birthday: text_of(&page, ".ProfileHeaderCard-birthdateText")
            .map(|text| text.trim_start_matches("Born ").to_string())
            .filter(|text| !text.is_empty()),
        biography: text_of(&page, ".ProfileHeaderCard-bio"),
        location: text_of(&page, ".ProfileHeaderCard-locationText"),
        website: text_of(&page, ".ProfileHeaderCard-urlText"),
        profile_photo: attr_of(&page, ".ProfileAvatar-image", "src"),
        banner_photo: attr_of(&page, ".ProfileCanopy-headerBg img", "src"),
        likes_count: count_of(&page, "favorites"),
        tweets_count: count_of(&page, "tweets"),
        followers_count: count_of(&page, "followers"),
        following_count: count_of(&page, "following"),
        is_verified: page
            .root()
            .has(".ProfileHeaderCard-badges .Icon--verified"),
        is_private: page
            .root()
            .has(".ProfileHeaderCard-badges .Icon--protected"),
        user_id: attr_of(&page, ".ProfileNav", "data-user-id"),
    })
}

/// Page titles read `Name (@handle) | Site`; keep what precedes the handle
fn display_name(title: &str) -> String {
    title
        .split_once('(')
        .map_or(title, |(name, _)| name)
        .trim()
        .to_string()
}

fn text_of(page: &Fragment, selector: &str) -> Option<String> {
    page.select_one(selector)
        .map(|node| node.clean_text())
        .filter(|text| !text.is_empty())
}

fn attr_of(page: &Fragment, selector: &str, attr: &str) -> Option<String> {
    page.select_one(selector)
        .and_then(|node| node.attr_non_empty(attr).map(str::to_string))
}

fn count_of(page: &Fragment, name: &str) -> Option<u64> {
    let selector = format!("li[class*=\"--{name}\"] span[data-count]");
    page.select_one(&selector)
        .and_then(|node| node.attr("data-count").and_then(|c| c.parse().ok()))
}
