//! Web discovery and acquisition for the fact-check pipeline.
//!
//! - Trusted-source catalog (`catalog`) selecting hostname allow-lists
//! - Google Custom Search client and source gateway (`search`) for discovery
//! - Concurrent scrape engine with proxy rotation (`scrape`) for acquisition
//!
//! The [`SourceDiscovery`] and [`PageScraper`] traits are the seams the
//! orchestrator depends on; the concrete engines here implement them, and
//! tests substitute stubs.

use async_trait::async_trait;
use claimlens_common::{DomainCategory, RecencyCategory};

pub mod catalog;
pub mod scrape;
pub mod search;

/// Discovers trusted source URLs corroborating (or refuting) a claim.
///
/// Failure is communicated as an empty list: an unconfigured or erroring
/// search backend means "no sources found", never a pipeline error.
#[async_trait]
pub trait SourceDiscovery: Send + Sync {
    async fn discover(
        &self,
        query: &str,
        domain: DomainCategory,
        recency: RecencyCategory,
    ) -> Vec<String>;
}

/// Fetches a batch of URLs and extracts their main text.
///
/// Only successful extractions are returned; output order is not guaranteed
/// to match input order.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape_all(&self, urls: &[String]) -> Vec<String>;
}
