//! Request headers expected by the legacy frontend
//!
//! The timeline endpoint only answers with markup-bearing JSON when the
//! request looks like an XHR from the old desktop web client.

use crate::types::StringMap;

/// Origin used for the `Referer` header
pub const REFERER_BASE: &str = "https://twitter.com";

/// User agent of the desktop browser the frontend still renders markup for
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/603.3.8 (KHTML, like Gecko) Version/10.1.2 Safari/603.3.8";

/// Build the header set for one run
///
/// `path` is templated into the `Referer`; pass `""` for pages that are not
/// tied to a profile or search.
pub fn get_headers(path: &str) -> StringMap {
    get_headers_with_agent(path, None)
}

/// Build the header set for one run, replacing the browser user agent when
/// `user_agent` is set
pub fn get_headers_with_agent(path: &str, user_agent: Option<&str>) -> StringMap {
    [
        ("Accept", "application/json, text/javascript, */*; q=0.01".to_string()),
        ("Referer", format!("{REFERER_BASE}/{path}")),
        ("User-Agent", user_agent.unwrap_or(USER_AGENT).to_string()),
        ("X-Twitter-Active-User", "yes".to_string()),
        ("X-Requested-With", "XMLHttpRequest".to_string()),
        ("Accept-Language", "en-US".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
