//! # Wikipedia Presence Tests
//!
//! Covers the substring heuristic directly and the HTTP lookup against a
//! `wiremock` server.

use fakeartist::providers::{
    wikipedia::{is_presence_match, page_url, strip_search_markup, WikipediaProvider},
    PresenceChecker,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> WikipediaProvider {
    WikipediaProvider::new(
        format!("{}/w/api.php", server.uri()),
        "https://en.wikipedia.org/wiki".to_string(),
        Duration::from_secs(5),
    )
    .expect("provider should build")
}

#[test]
fn test_title_substring_matches() {
    assert!(is_presence_match("drake", "Drake (musician)", None));
    assert!(is_presence_match("  DRAKE ", "Drake (musician)", None));
}

#[test]
fn test_unrelated_title_does_not_match() {
    assert!(!is_presence_match("drake", "Unrelated Page", None));
    assert!(!is_presence_match(
        "drake",
        "Unrelated Page",
        Some("nothing relevant here")
    ));
}

#[test]
fn test_snippet_substring_matches() {
    assert!(is_presence_match(
        "drake",
        "Unrelated Page",
        Some("Aubrey Drake Graham is a rapper")
    ));
}

#[test]
fn test_short_names_collide_with_longer_titles() {
    // Accepted false positive of the substring heuristic.
    assert!(is_presence_match("ado", "Colorado", None));
}

#[test]
fn test_page_url_and_markup() {
    assert_eq!(
        page_url("https://en.wikipedia.org/wiki/", "Drake (musician)"),
        "https://en.wikipedia.org/wiki/Drake_%28musician%29"
    );
    assert_eq!(
        strip_search_markup(r#"<span class="searchmatch">Taylor</span> <span class="searchmatch">Swift</span> is"#),
        "Taylor Swift is"
    );
}

#[tokio::test]
async fn test_check_presence_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "search"))
        .and(query_param("format", "json"))
        .and(query_param("origin", "*"))
        .and(query_param("srsearch", "Taylor Swift"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {
                "searchinfo": { "totalhits": 2 },
                "search": [
                    {
                        "ns": 0,
                        "title": "Taylor Swift",
                        "pageid": 5422144,
                        "snippet": "<span class=\"searchmatch\">Taylor</span> <span class=\"searchmatch\">Swift</span> is an American singer-songwriter"
                    },
                    { "ns": 0, "title": "Taylor Swift discography", "pageid": 1, "snippet": "" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let presence = provider(&server).check_presence("Taylor Swift").await;

    assert!(presence.has_page);
    assert_eq!(presence.page_title.as_deref(), Some("Taylor Swift"));
    assert_eq!(
        presence.page_url.as_deref(),
        Some("https://en.wikipedia.org/wiki/Taylor_Swift")
    );
    assert_eq!(
        presence.snippet.as_deref(),
        Some("Taylor Swift is an American singer-songwriter")
    );
}

#[tokio::test]
async fn test_check_presence_only_considers_top_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [
                { "title": "Something Else", "snippet": "unrelated" },
                { "title": "Lil Fakename", "snippet": "Lil Fakename is a producer" }
            ] }
        })))
        .mount(&server)
        .await;

    let presence = provider(&server).check_presence("Lil Fakename").await;

    assert_eq!(presence, fakeartist::WikipediaPresence::absent());
}

#[tokio::test]
async fn test_check_presence_matches_raw_snippet_markup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [
                {
                    "title": "List of indie labels",
                    "snippet": "signed <span class=\"searchmatch\">Velvet</span> <span class=\"searchmatch\">Static</span> in 2021"
                }
            ] }
        })))
        .mount(&server)
        .await;

    let presence = provider(&server).check_presence("Velvet Static").await;

    assert_eq!(presence, fakeartist::WikipediaPresence::absent());
}

#[tokio::test]
async fn test_check_presence_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "query": { "search": [] } })),
        )
        .mount(&server)
        .await;

    let presence = provider(&server).check_presence("qqqq").await;

    assert!(!presence.has_page);
    assert!(presence.page_url.is_none());
}

#[tokio::test]
async fn test_check_presence_degrades_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let presence = provider(&server).check_presence("Drake").await;

    assert_eq!(presence, fakeartist::WikipediaPresence::absent());
}
