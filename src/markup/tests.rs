//! Tests for the markup module

use super::*;

const SAMPLE: &str = r#"
<li class="stream-item" data-item-id="1">
  <div class="js-stream-tweet" data-retweet-id="">
    <p class="tweet-text">Hello   <b>bold</b>
      world</p>
    <a class="twitter-hashtag">#one</a>
    <a class="twitter-hashtag">#two</a>
  </div>
</li>
<li class="stream-item" data-item-id="2"></li>
"#;

#[test]
fn test_parse_rejects_empty_fragment() {
    assert!(Fragment::parse("").is_none());
    assert!(Fragment::parse("   \n\t ").is_none());
    assert!(Fragment::parse_document("").is_none());
}

#[test]
fn test_select_all_in_document_order() {
    let fragment = Fragment::parse(SAMPLE).unwrap();
    let items = fragment.select_all(".stream-item");
    let ids: Vec<_> = items.iter().filter_map(|n| n.attr("data-item-id")).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_nested_selection_and_text() {
    let fragment = Fragment::parse(SAMPLE).unwrap();
    let item = fragment.select_one(".stream-item").unwrap();

    let text = item.select_one(".tweet-text").unwrap();
    assert!(text.full_text().contains("Hello   bold"));
    assert_eq!(text.clean_text(), "Hello bold world");

    let hashtags: Vec<_> = item
        .select_all(".twitter-hashtag")
        .iter()
        .map(MarkupNode::full_text)
        .collect();
    assert_eq!(hashtags, vec!["#one", "#two"]);
}

#[test]
fn test_attr_lookup() {
    let fragment = Fragment::parse(SAMPLE).unwrap();
    let tweet = fragment.select_one(".js-stream-tweet").unwrap();

    assert_eq!(tweet.attr("data-retweet-id"), Some(""));
    assert_eq!(tweet.attr_non_empty("data-retweet-id"), None);
    assert_eq!(tweet.attr("data-missing"), None);
}

#[test]
fn test_missing_and_invalid_selectors() {
    let fragment = Fragment::parse(SAMPLE).unwrap();
    let item = fragment.select_one(".stream-item").unwrap();

    assert!(!item.has("div.pinned"));
    assert!(item.has(".tweet-text"));
    assert!(item.select_all("[[[").is_empty());
    assert!(fragment.select_one(".nothing-here").is_none());
}
