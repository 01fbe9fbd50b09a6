use claimlens_common::{DomainCategory, RecencyCategory};
use claimlens_web::search::client::CseApi;
use claimlens_web::search::{SearchConfig, SourceGateway};
use claimlens_web::SourceDiscovery;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> SearchConfig {
    SearchConfig {
        page_delay: Duration::ZERO,
        ..SearchConfig::default()
    }
}

fn gateway_for(server: &MockServer) -> SourceGateway {
    let api = CseApi::new("test-key".into(), "test-cx".into(), &server.uri())
        .expect("client builds");
    SourceGateway::new(Some(api), test_config())
}

#[tokio::test]
async fn aggregates_pages_and_filters_to_trusted_hosts() {
    let server = MockServer::start().await;

    let page_one = json!({
        "items": [
            {"link": "https://randomblog.example.com/rice", "title": "blog"},
            {"link": "https://en.wikipedia.org/wiki/Rice", "title": "wiki"},
            {"link": "https://www.healthline.com/nutrition/rice", "title": "hl"},
            {"link": "https://en.wikipedia.org/wiki/Rice", "title": "dup"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_one))
        .mount(&server)
        .await;

    // Second page is empty, which terminates paging.
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let urls = gateway
        .discover(
            "eating rice makes you fat",
            DomainCategory::Health,
            RecencyCategory::Evergreen,
        )
        .await;

    assert_eq!(
        urls,
        vec![
            "https://en.wikipedia.org/wiki/Rice".to_string(),
            "https://www.healthline.com/nutrition/rice".to_string(),
        ]
    );
}

#[tokio::test]
async fn caps_evergreen_results_at_five() {
    let server = MockServer::start().await;

    let items: Vec<_> = (0..8)
        .map(|i| json!({"link": format!("https://en.wikipedia.org/wiki/Topic_{i}")}))
        .collect();

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let urls = gateway
        .discover("topic", DomainCategory::General, RecencyCategory::Evergreen)
        .await;

    assert_eq!(urls.len(), 5);
}

#[tokio::test]
async fn failing_search_api_yields_no_sources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "backend unavailable"}
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let urls = gateway
        .discover("anything", DomainCategory::Finance, RecencyCategory::Evergreen)
        .await;

    assert!(urls.is_empty());
}

#[tokio::test]
async fn realtime_fallback_accepts_breaking_news_urls() {
    let server = MockServer::start().await;

    let page = json!({
        "items": [
            {"link": "https://www.reuters.com/world/major-quake"},
            {"link": "https://quake-tracker.example.org/live-coverage"},
            {"link": "https://someblog.example.net/opinion"}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let urls = gateway
        .discover("major quake", DomainCategory::General, RecencyCategory::Realtime)
        .await;

    assert_eq!(
        urls,
        vec![
            "https://www.reuters.com/world/major-quake".to_string(),
            "https://quake-tracker.example.org/live-coverage".to_string(),
        ]
    );
}
