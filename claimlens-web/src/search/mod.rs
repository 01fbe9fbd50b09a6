//! Source discovery: paged web search filtered against the trust catalog.

pub mod client;
pub mod types;

use crate::catalog::TrustCatalog;
use crate::SourceDiscovery;
use async_trait::async_trait;
use claimlens_common::{DomainCategory, RecencyCategory};
use client::CseApi;
use std::time::Duration;
use tokio::time::sleep;

/// Acceptance widens to these URL keywords when a real-time search finds
/// too few catalog hits.
const REALTIME_FALLBACK_KEYWORDS: &[&str] = &["news", "live", "breaking", "latest"];

/// Minimum catalog hits before the real-time fallback kicks in.
const REALTIME_FALLBACK_THRESHOLD: usize = 3;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Upper bound on raw hits aggregated across pages.
    pub max_total_results: u32,
    /// Hits requested per page.
    pub page_size: u32,
    /// Fixed delay between page requests. Applied to both recency variants.
    pub page_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_total_results: 50,
            page_size: 10,
            page_delay: Duration::from_secs(1),
        }
    }
}

/// Search gateway: pages through the search API, aggregates links, and
/// filters them to the trusted-source list for the claim's categories.
///
/// Constructed without an API client (missing credentials), discovery
/// returns an empty list — callers treat that as "no sources found".
pub struct SourceGateway {
    api: Option<CseApi>,
    config: SearchConfig,
}

impl SourceGateway {
    pub fn new(api: Option<CseApi>, config: SearchConfig) -> Self {
        Self { api, config }
    }

    /// Aggregate raw result links page by page. Stops at the first empty or
    /// failed page; a failure on the first page yields an empty list.
    async fn collect_links(&self, api: &CseApi, query: &str) -> Vec<String> {
        let mut links = Vec::new();
        let mut start_index = 1u32;

        while start_index <= self.config.max_total_results {
            if start_index > 1 && !self.config.page_delay.is_zero() {
                sleep(self.config.page_delay).await;
            }

            match api.search_page(query, start_index, self.config.page_size).await {
                Ok(page) if !page.is_empty() => {
                    links.extend(page.hits().into_iter().map(|hit| hit.url));
                }
                Ok(_) => break,
                Err(_) => break, // already logged by the client
            }

            start_index += self.config.page_size;
        }

        tracing::info!(
            target: "search.gateway",
            total = links.len(),
            "aggregated search results"
        );
        links
    }
}

#[async_trait]
impl SourceDiscovery for SourceGateway {
    async fn discover(
        &self,
        query: &str,
        domain: DomainCategory,
        recency: RecencyCategory,
    ) -> Vec<String> {
        let Some(api) = &self.api else {
            tracing::warn!(
                target: "search.gateway",
                "search API credentials not configured; returning no sources"
            );
            return Vec::new();
        };

        tracing::info!(
            target: "search.gateway",
            %domain,
            %recency,
            "searching for trusted sources"
        );

        let links = self.collect_links(api, query).await;
        let trusted = filter_trusted(&links, domain, recency);

        tracing::info!(
            target: "search.gateway",
            trusted = trusted.len(),
            of = links.len(),
            "filtered to trusted sources"
        );
        trusted
    }
}

/// Filter raw links against the catalog list for `(domain, recency)`.
///
/// A link is trusted if any catalog hostname is a substring of it.
/// Duplicates are dropped and the result is capped per recency. Real-time
/// searches that find fewer than three catalog hits widen acceptance to
/// URLs carrying breaking-news keywords, still under the cap.
pub fn filter_trusted(
    links: &[String],
    domain: DomainCategory,
    recency: RecencyCategory,
) -> Vec<String> {
    let trusted_sites = TrustCatalog::trusted_sites(domain, recency);
    let cap = recency.source_cap();

    let mut filtered: Vec<String> = Vec::new();
    for link in links {
        if trusted_sites.iter().any(|site| link.contains(site))
            && !filtered.contains(link)
        {
            filtered.push(link.clone());
            if filtered.len() >= cap {
                return filtered;
            }
        }
    }

    if recency == RecencyCategory::Realtime && filtered.len() < REALTIME_FALLBACK_THRESHOLD {
        for link in links {
            if filtered.len() >= cap {
                break;
            }
            let lower = link.to_lowercase();
            if REALTIME_FALLBACK_KEYWORDS.iter().any(|kw| lower.contains(kw))
                && !filtered.contains(link)
            {
                tracing::debug!(target: "search.gateway", url = %link, "accepted via keyword fallback");
                filtered.push(link.clone());
            }
        }
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_keeps_only_catalog_hosts_and_dedupes() {
        let links = urls(&[
            "https://en.wikipedia.org/wiki/Rice",
            "https://randomblog.example.com/rice-myths",
            "https://en.wikipedia.org/wiki/Rice",
            "https://www.healthline.com/nutrition/rice",
        ]);
        let got = filter_trusted(&links, DomainCategory::Health, RecencyCategory::Evergreen);
        assert_eq!(
            got,
            urls(&[
                "https://en.wikipedia.org/wiki/Rice",
                "https://www.healthline.com/nutrition/rice",
            ])
        );
    }

    #[test]
    fn evergreen_filter_caps_at_five() {
        let links = urls(&[
            "https://www.cdc.gov/a",
            "https://www.mayoclinic.org/b",
            "https://www.webmd.com/c",
            "https://www.nhs.uk/d",
            "https://www.healthline.com/e",
            "https://www.fda.gov/f",
            "https://www.thelancet.com/g",
        ]);
        let got = filter_trusted(&links, DomainCategory::Health, RecencyCategory::Evergreen);
        assert_eq!(got.len(), 5);
    }

    #[test]
    fn realtime_widens_to_keyword_urls_when_short() {
        let links = urls(&[
            "https://www.reuters.com/world/quake",
            "https://example.org/live-updates-quake",
            "https://example.net/blog/unrelated",
            "https://another.example/breaking-quake-report",
        ]);
        let got = filter_trusted(&links, DomainCategory::General, RecencyCategory::Realtime);
        assert_eq!(
            got,
            urls(&[
                "https://www.reuters.com/world/quake",
                "https://example.org/live-updates-quake",
                "https://another.example/breaking-quake-report",
            ])
        );
    }

    #[test]
    fn realtime_fallback_respects_cap() {
        let mut raw = vec![];
        for i in 0..20 {
            raw.push(format!("https://site{i}.example/latest-news-{i}"));
        }
        let got = filter_trusted(&raw, DomainCategory::General, RecencyCategory::Realtime);
        assert_eq!(got.len(), RecencyCategory::Realtime.source_cap());
    }

    #[tokio::test]
    async fn unconfigured_gateway_discovers_nothing() {
        let gateway = SourceGateway::new(None, SearchConfig::default());
        let got = gateway
            .discover("anything", DomainCategory::General, RecencyCategory::Evergreen)
            .await;
        assert!(got.is_empty());
    }
}
