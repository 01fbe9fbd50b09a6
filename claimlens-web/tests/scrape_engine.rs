use claimlens_web::scrape::{ScrapeConfig, ScrapeEngine};
use claimlens_web::PageScraper;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry_config() -> ScrapeConfig {
    ScrapeConfig {
        retry_delay_min: Duration::ZERO,
        retry_delay_max: Duration::ZERO,
        timeout: Duration::from_secs(5),
        ..ScrapeConfig::default()
    }
}

const ARTICLE_HTML: &str = r#"
<html><body>
  <p>Rice is a staple food for billions of people.</p>
  <p>Weight change depends on overall caloric balance.</p>
</body></html>
"#;

#[tokio::test]
async fn scrapes_batch_and_drops_failed_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article-ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/article-missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let engine = ScrapeEngine::new(fast_retry_config(), &[]).unwrap();
    let urls = vec![
        format!("{}/article-ok", server.uri()),
        format!("{}/article-missing", server.uri()),
    ];

    let contents = engine.scrape_all(&urls).await;

    assert_eq!(contents.len(), 1);
    assert!(contents[0].contains("staple food"));
    assert!(contents[0].contains("caloric balance"));
}

#[tokio::test]
async fn rate_limited_fetch_is_retried_once() {
    let server = MockServer::start().await;

    // First hit is throttled; the single retry then succeeds.
    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/throttled"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .mount(&server)
        .await;

    let engine = ScrapeEngine::new(fast_retry_config(), &[]).unwrap();
    let urls = vec![format!("{}/throttled", server.uri())];

    let contents = engine.scrape_all(&urls).await;

    assert_eq!(contents.len(), 1);
    assert!(contents[0].contains("staple food"));
}

#[tokio::test]
async fn persistent_rate_limiting_gives_up_after_one_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/always-throttled"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let engine = ScrapeEngine::new(fast_retry_config(), &[]).unwrap();
    let urls = vec![format!("{}/always-throttled", server.uri())];

    let contents = engine.scrape_all(&urls).await;
    assert!(contents.is_empty());
}

#[tokio::test]
async fn forbidden_source_is_skipped_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/walled"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let engine = ScrapeEngine::new(fast_retry_config(), &[]).unwrap();
    let urls = vec![format!("{}/walled", server.uri())];

    let contents = engine.scrape_all(&urls).await;
    assert!(contents.is_empty());
}

#[tokio::test]
async fn url_claim_input_is_fetched_and_extracted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE_HTML))
        .mount(&server)
        .await;

    let engine = ScrapeEngine::new(fast_retry_config(), &[]).unwrap();
    let resolved =
        claimlens_web::scrape::resolve_claim_input(&engine, &format!("{}/story", server.uri()))
            .await;

    let text = resolved.expect("url resolves");
    assert!(text.contains("staple food"));
}
