//! Fact-verification pipeline for news claims.
//!
//! Given a claim, its recency category, and its misinformation domain, the
//! pipeline discovers trusted sources through a web-search gateway, scrapes
//! them concurrently, asks a hosted LLM to summarize / educate / judge, and
//! derives a numeric trust score from the verdict — assembling everything
//! into a [`FactCheckReport`].
//!
//! The crate never raises an error to its caller: all failure is
//! communicated through the returned report (`processing_errors`, `status`,
//! `success`).
//!
//! # Examples
//! ```no_run
//! use std::sync::Arc;
//! use claimlens_factcheck::{ArtifactStore, FactChecker, initialize_fact_checker};
//! use claimlens_web::scrape::{ScrapeConfig, ScrapeEngine};
//! use claimlens_web::search::{SearchConfig, SourceGateway};
//!
//! # async fn demo(llm: Arc<dyn claimlens_llm::traits::LlmClient>) -> anyhow::Result<()> {
//! let gateway = SourceGateway::new(None, SearchConfig::default());
//! let scraper = ScrapeEngine::new(ScrapeConfig::default(), &[])?;
//! let checker = FactChecker::new(
//!     Arc::new(gateway),
//!     Arc::new(scraper),
//!     llm,
//!     Some(ArtifactStore::new("results")),
//! );
//!
//! let report = initialize_fact_checker(
//!     &checker,
//!     "Evergreen News",
//!     "Eating rice makes you fat",
//!     "Health",
//!     None,
//! )
//! .await;
//! assert_eq!(report.scraped_content_count, report.scraped_contents.len());
//! # Ok(())
//! # }
//! ```
pub mod artifact;
pub mod orchestrator;
pub mod report;

pub use artifact::ArtifactStore;
pub use orchestrator::{initialize_fact_checker, FactChecker, NOT_RECOGNIZED_MESSAGE};
pub use report::{FactCheckReport, ReportStatus};
