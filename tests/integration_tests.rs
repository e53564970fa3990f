//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: query → paged HTTP requests → extracted records

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use timeline_scraper::{Error, Scraper, ScraperConfig, TimelineQuery};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn post(id: &str, handle: &str, text: &str, extra: &str) -> String {
    format!(
        r#"<li class="js-stream-item stream-item" data-item-id="{id}">
  <div class="tweet js-stream-tweet js-profile-popup-actionable" data-item-id="{id}"
       data-permalink-path="/{handle}/status/{id}" data-screen-name="{handle}"
       data-user-id="42">
    <span class="_timestamp" data-time-ms="1546300800000"></span>
    <div class="js-tweet-text-container"><p class="tweet-text">{text}</p></div>
    {extra}
  </div>
</li>"#
    )
}

fn page(items: &[String]) -> serde_json::Value {
    json!({ "items_html": items.join("\n") })
}

fn scraper_for(server: &MockServer) -> Scraper {
    Scraper::new(ScraperConfig::default().with_base_url(server.uri())).unwrap()
}

// ============================================================================
// Timeline Tests
// ============================================================================

#[tokio::test]
async fn test_hashtag_run_stops_on_malformed_page() {
    let mock_server = MockServer::start().await;

    let counters = r#"<div class="ProfileTweet-actionList">
        <span class="ProfileTweet-actionCount">3</span>
        <span class="ProfileTweet-actionCount">1,204</span>
        <span class="ProfileTweet-actionCount">15</span>
    </div>"#;

    Mock::given(method("GET"))
        .and(path("/i/search/timeline"))
        .and(query_param("q", "#example"))
        .and(query_param("f", "tweets"))
        .and(query_param_is_missing("max_position"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("Referer", "https://twitter.com/%23example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[
            post(
                "1000",
                "alice",
                r#"first <a class="twitter-hashtag">#example</a>"#,
                counters,
            ),
            post("900", "bob", "second", ""),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/i/search/timeline"))
        .and(query_param("max_position", "900"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items_html": "   " })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let mut timeline = scraper
        .tweets(&TimelineQuery::new("#example").pages(2))
        .unwrap();
    let records = timeline.collect_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].tweet_id, "1000");
    assert_eq!(records[0].username, "alice");
    assert_eq!(records[0].retweets, 1204);
    assert_eq!(records[0].entries.hashtags, vec!["#example"]);
    assert_eq!(records[1].tweet_id, "900");
    assert_eq!(records[1].likes, 0);
    assert_eq!(timeline.pages_fetched(), 2);
    assert!(timeline.is_finished());
}

#[tokio::test]
async fn test_page_budget_limits_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/i/profiles/show/alice/timeline/tweets"))
        .and(query_param("include_entities", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[
            post("30", "alice", "three", ""),
            post("20", "alice", "two", ""),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let records: Vec<_> = scraper
        .tweets(&TimelineQuery::new("alice"))
        .unwrap()
        .into_stream()
        .collect()
        .await;

    let ids: Vec<_> = records
        .into_iter()
        .map(|r| r.unwrap().tweet_id)
        .collect();
    assert_eq!(ids, vec!["30", "20"]);
}

#[tokio::test]
async fn test_unknown_profile_fails_before_any_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/i/profiles/show/ghost/timeline/tweets"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "Sorry, that page does not exist" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let mut timeline = scraper.tweets(&TimelineQuery::new("ghost").pages(5)).unwrap();

    let first = timeline.next().await.unwrap();
    assert!(matches!(first, Err(Error::ProfileUnavailable { ref target }) if target == "ghost"));
    assert!(timeline.next().await.is_none());
}

#[tokio::test]
async fn test_non_json_body_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/i/profiles/show/ghost/timeline/tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let scraper = scraper_for(&mock_server);
    let err = scraper
        .tweets(&TimelineQuery::new("ghost"))
        .unwrap()
        .collect_all()
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_transport_failure_ends_run() {
    let scraper = Scraper::new(ScraperConfig::default().with_base_url("http://127.0.0.1:1")).unwrap();
    let err = scraper
        .tweets(&TimelineQuery::new("alice"))
        .unwrap()
        .collect_all()
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

// ============================================================================
// Profile & Trends Tests
// ============================================================================

#[tokio::test]
async fn test_profile_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jack"))
        .and(header("Referer", "https://twitter.com/jack"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Jack (@jack) | Twitter</title></head><body>
              <p class="ProfileHeaderCard-bio">just setting up</p>
              <div class="ProfileNav" data-user-id="12"><ul>
                <li class="ProfileNav-item ProfileNav-item--followers"><a><span data-count="77">77</span></a></li>
              </ul></div>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let profile = scraper_for(&mock_server).profile("jack").await.unwrap();
    assert_eq!(profile.name.as_deref(), Some("Jack"));
    assert_eq!(profile.username, "jack");
    assert_eq!(profile.biography.as_deref(), Some("just setting up"));
    assert_eq!(profile.followers_count, Some(77));
    assert_eq!(profile.user_id.as_deref(), Some("12"));
}

#[tokio::test]
async fn test_missing_profile_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "This user does not exist." })),
        )
        .mount(&mock_server)
        .await;

    let err = scraper_for(&mock_server).profile("ghost").await.unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_trends() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/i/trends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "module_html": r#"<ul>
                <li data-trend-name="Ferris"><a>Ferris</a></li>
                <li data-trend-name="Crabs"><a>Crabs</a></li>
            </ul>"#
        })))
        .mount(&mock_server)
        .await;

    let trends = scraper_for(&mock_server).trends().await.unwrap();
    assert_eq!(trends, vec!["Ferris", "Crabs"]);
}

// ============================================================================
// Config Tests
// ============================================================================

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    let agent = "my-custom-agent/1.0";

    Mock::given(method("GET"))
        .and(path("/i/profiles/show/jack/timeline/tweets"))
        .and(header("User-Agent", agent))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[post(
            "5", "jack", "hi", "",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jack"))
        .and(header("User-Agent", agent))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>Jack (@jack)</title></head></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/i/trends"))
        .and(header("User-Agent", agent))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "module_html": "" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ScraperConfig {
        user_agent: Some(agent.to_string()),
        ..ScraperConfig::default().with_base_url(mock_server.uri())
    };
    let scraper = Scraper::new(config).unwrap();

    let records = scraper
        .tweets(&TimelineQuery::new("jack"))
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(records.len(), 1);

    let profile = scraper.profile("jack").await.unwrap();
    assert_eq!(profile.name.as_deref(), Some("Jack"));

    assert!(scraper.trends().await.unwrap().is_empty());

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
    for request in received {
        let sent = request
            .headers
            .get("user-agent")
            .and_then(|value| value.to_str().ok());
        assert_eq!(sent, Some(agent));
    }
}
