//! Trending topics
//!
//! Single-shot fetch of the trends module rendered by the legacy frontend.

use crate::error::{Error, Result};
use crate::http::{get_headers_with_agent, HttpClient, RequestConfig};
use crate::markup::{Fragment, MarkupNode};
use crate::types::JsonValue;
use tracing::info;

/// JSON key holding the rendered trends list
pub const MODULE_HTML_KEY: &str = "module_html";

/// Fetch the current trending topics
pub async fn fetch_trends(
    client: &HttpClient,
    base_url: &str,
    user_agent: Option<&str>,
) -> Result<Vec<String>> {
    let url = format!("{}/i/trends", base_url.trim_end_matches('/'));
    info!("Fetching trends");

    let body = client
        .get_text(
            &url,
            RequestConfig::new().headers(&get_headers_with_agent("", user_agent)),
        )
        .await?;

    parse_trends(&body)
}

/// Extract trend names, in display order, from a trends response body
pub fn parse_trends(body: &str) -> Result<Vec<String>> {
    let value: JsonValue = serde_json::from_str(body)?;
    let markup = value
        .get(MODULE_HTML_KEY)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| Error::decode(format!("trends response has no '{MODULE_HTML_KEY}'")))?;

    let Some(fragment) = Fragment::parse(markup) else {
        return Ok(Vec::new());
    };

    Ok(fragment
        .select_all("li")
        .iter()
        .filter_map(|item| item.attr("data-trend-name").map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_trends() {
        let body = json!({
            "module_html": r##"<ul>
                <li class="trend-item" data-trend-name="#RustLang"><a>#RustLang</a></li>
                <li class="trend-item" data-trend-name="Ferris"><a>Ferris</a></li>
                <li class="promoted">Ad</li>
            </ul>"##
        })
        .to_string();

        assert_eq!(parse_trends(&body).unwrap(), vec!["#RustLang", "Ferris"]);
    }

    #[test]
    fn test_missing_module_html() {
        let err = parse_trends(r#"{"errors":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_trends("<html>"), Err(Error::JsonParse(_))));
    }

    #[test]
    fn test_empty_module() {
        let body = json!({ "module_html": "" }).to_string();
        assert!(parse_trends(&body).unwrap().is_empty());
    }
}
