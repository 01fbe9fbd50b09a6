//! Concurrent scrape engine with proxy rotation.
//!
//! Every URL in a batch is fetched concurrently with a browser User-Agent
//! and a fixed per-request timeout. A configured proxy pool is walked in a
//! randomly-shuffled cycle; without proxies every request goes direct.
//!
//! Retry policy: `429` gets exactly one retry after a jittered delay on the
//! next proxy in rotation, `403` is a permanent per-URL failure, and every
//! other failure (timeout, connect error, HTTP error, empty extraction) is
//! logged and skipped with no retry.

use crate::PageScraper;
use async_trait::async_trait;
use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::{Client, Proxy, StatusCode};
use scraper::{Html, Selector};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Per-request timeout; there is no batch-level deadline.
    pub timeout: Duration,
    pub user_agent: String,
    /// Bounds of the jittered delay before the single 429 retry.
    pub retry_delay_min: Duration,
    pub retry_delay_max: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
            retry_delay_min: Duration::from_secs(5),
            retry_delay_max: Duration::from_secs(15),
        }
    }
}

/// Shuffled cycle over proxy-pool slots. Reshuffles and restarts once the
/// cycle is exhausted. Iterator state is per-batch and never shared across
/// pipeline invocations.
pub struct ProxyCycle {
    order: Vec<usize>,
    pos: usize,
}

impl ProxyCycle {
    pub fn new(pool_size: usize) -> Self {
        let mut order: Vec<usize> = (0..pool_size).collect();
        order.shuffle(&mut rand::thread_rng());
        Self { order, pos: 0 }
    }

    /// Next proxy slot, or `None` when the pool is empty (direct egress).
    pub fn next_slot(&mut self) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        if self.pos == self.order.len() {
            self.order.shuffle(&mut rand::thread_rng());
            self.pos = 0;
        }
        let slot = self.order[self.pos];
        self.pos += 1;
        Some(slot)
    }
}

enum FetchOutcome {
    Content(String),
    RateLimited,
    Forbidden,
    Failed,
}

/// Fetches batches of URLs and extracts their main textual content.
pub struct ScrapeEngine {
    direct: Client,
    proxied: Vec<Client>,
    config: ScrapeConfig,
}

impl ScrapeEngine {
    /// Build the engine: one client per proxy endpoint plus a direct client.
    /// A proxy endpoint that fails to parse is skipped with a warning.
    pub fn new(config: ScrapeConfig, proxies: &[String]) -> anyhow::Result<Self> {
        let direct = base_builder(&config).build()?;

        let mut proxied = Vec::with_capacity(proxies.len());
        for endpoint in proxies {
            match Proxy::all(endpoint) {
                Ok(proxy) => {
                    proxied.push(base_builder(&config).proxy(proxy).build()?);
                }
                Err(e) => {
                    tracing::warn!(
                        target: "web.scrape",
                        endpoint = %endpoint,
                        error = %e,
                        "ignoring unparseable proxy endpoint"
                    );
                }
            }
        }

        tracing::info!(
            target: "web.scrape",
            proxy_count = proxied.len(),
            "scrape engine ready"
        );

        Ok(Self {
            direct,
            proxied,
            config,
        })
    }

    fn client_for(&self, slot: Option<usize>) -> &Client {
        match slot {
            Some(idx) => &self.proxied[idx],
            None => &self.direct,
        }
    }

    /// Fetch and extract a single URL through the rotation, applying the
    /// 429-retry / 403-skip policy.
    async fn scrape_one(&self, url: &str, cycle: &Mutex<ProxyCycle>) -> Option<String> {
        let slot = cycle.lock().ok()?.next_slot();

        match self.fetch(url, slot).await {
            FetchOutcome::Content(text) => Some(text),
            FetchOutcome::Forbidden => {
                tracing::warn!(target: "web.scrape", url = %url, "403: permanently skipping source");
                None
            }
            FetchOutcome::RateLimited => {
                let delay = self.retry_delay();
                tracing::warn!(
                    target: "web.scrape",
                    url = %url,
                    delay_ms = delay.as_millis() as u64,
                    "429: retrying once after delay"
                );
                tokio::time::sleep(delay).await;

                let retry_slot = cycle.lock().ok()?.next_slot();
                match self.fetch(url, retry_slot).await {
                    FetchOutcome::Content(text) => Some(text),
                    _ => {
                        tracing::warn!(target: "web.scrape", url = %url, "retry failed; giving up");
                        None
                    }
                }
            }
            FetchOutcome::Failed => None,
        }
    }

    async fn fetch(&self, url: &str, slot: Option<usize>) -> FetchOutcome {
        let resp = match self.client_for(slot).get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(target: "web.scrape", url = %url, error = %e, "fetch failed");
                return FetchOutcome::Failed;
            }
        };

        match resp.status() {
            status if status.is_success() => match resp.text().await {
                Ok(html) => {
                    let text = extract_main_text(&html);
                    if text.is_empty() {
                        tracing::warn!(target: "web.scrape", url = %url, "no text extracted");
                        FetchOutcome::Failed
                    } else {
                        tracing::debug!(
                            target: "web.scrape",
                            url = %url,
                            chars = text.len(),
                            "extracted page text"
                        );
                        FetchOutcome::Content(text)
                    }
                }
                Err(e) => {
                    tracing::warn!(target: "web.scrape", url = %url, error = %e, "body read failed");
                    FetchOutcome::Failed
                }
            },
            StatusCode::TOO_MANY_REQUESTS => FetchOutcome::RateLimited,
            StatusCode::FORBIDDEN => FetchOutcome::Forbidden,
            status => {
                tracing::warn!(target: "web.scrape", url = %url, %status, "fetch failed");
                FetchOutcome::Failed
            }
        }
    }

    fn retry_delay(&self) -> Duration {
        let min = self.config.retry_delay_min.as_millis() as u64;
        let max = self.config.retry_delay_max.as_millis() as u64;
        if min >= max {
            return self.config.retry_delay_min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    /// Fetch a single URL outside batch rotation (used to resolve URL-shaped
    /// claim inputs). Same extraction, no retry.
    pub async fn fetch_text(&self, url: &str) -> Option<String> {
        match self.fetch(url, None).await {
            FetchOutcome::Content(text) => Some(text),
            _ => None,
        }
    }
}

fn base_builder(config: &ScrapeConfig) -> reqwest::ClientBuilder {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
}

#[async_trait]
impl PageScraper for ScrapeEngine {
    async fn scrape_all(&self, urls: &[String]) -> Vec<String> {
        tracing::info!(target: "web.scrape", count = urls.len(), "scraping batch");

        let cycle = Mutex::new(ProxyCycle::new(self.proxied.len()));
        let fetches = urls.iter().map(|url| self.scrape_one(url, &cycle));

        let contents: Vec<String> = join_all(fetches).await.into_iter().flatten().collect();

        tracing::info!(
            target: "web.scrape",
            scraped = contents.len(),
            of = urls.len(),
            "batch complete"
        );
        contents
    }
}

/// Extract main textual content from an HTML document: the concatenated
/// text of all paragraph elements, falling back to the whole document's
/// visible text when no paragraph yields anything.
pub fn extract_main_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let paragraph = Selector::parse("p").unwrap();
    let text = collect_text(doc.select(&paragraph).flat_map(|p| p.text()));
    if !text.is_empty() {
        return text;
    }

    collect_text(doc.root_element().text())
}

fn collect_text<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a claim input that may be either raw text or a URL: URLs are
/// fetched and extracted, text passes through. `None` means the URL could
/// not be fetched.
pub async fn resolve_claim_input(engine: &ScrapeEngine, input: &str) -> Option<String> {
    let trimmed = input.trim();
    let is_web_url = Url::parse(trimmed)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);

    if is_web_url {
        engine.fetch_text(trimmed).await
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn proxy_cycle_visits_every_slot_before_repeating() {
        let mut cycle = ProxyCycle::new(3);
        let draws: Vec<usize> = (0..7).map(|_| cycle.next_slot().unwrap()).collect();

        // Each full cycle of 3 is a permutation of all slots.
        for chunk in draws.chunks(3).filter(|c| c.len() == 3) {
            let mut sorted = chunk.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2]);
        }

        // Over 7 draws every proxy serves at least twice.
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for slot in draws {
            *counts.entry(slot).or_default() += 1;
        }
        for slot in 0..3 {
            assert!(counts[&slot] >= 2, "slot {slot} underused: {counts:?}");
        }
    }

    #[test]
    fn empty_pool_always_goes_direct() {
        let mut cycle = ProxyCycle::new(0);
        assert_eq!(cycle.next_slot(), None);
        assert_eq!(cycle.next_slot(), None);
    }

    #[test]
    fn extraction_prefers_paragraphs() {
        let html = r#"
            <html><head><title>t</title></head>
            <body>
              <nav>menu items</nav>
              <p>Rice is a staple food.</p>
              <p>It is rich in carbohydrates.</p>
            </body></html>
        "#;
        let text = extract_main_text(html);
        assert_eq!(text, "Rice is a staple food. It is rich in carbohydrates.");
    }

    #[test]
    fn extraction_falls_back_to_full_text() {
        let html = "<html><body><div>Hello</div><span>world</span></body></html>";
        let text = extract_main_text(html);
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
    }

    #[test]
    fn extraction_of_empty_page_is_empty() {
        assert_eq!(extract_main_text("<html><body></body></html>"), "");
    }

    #[tokio::test]
    async fn text_input_passes_through_resolution() {
        let engine = ScrapeEngine::new(ScrapeConfig::default(), &[]).unwrap();
        let got = resolve_claim_input(&engine, "  Eating rice makes you fat  ").await;
        assert_eq!(got.as_deref(), Some("Eating rice makes you fat"));
    }
}
