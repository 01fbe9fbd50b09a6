//! The fact-check pipeline orchestrator.
//!
//! A run walks `Start → SourceDiscovery → Scraping → Synthesis → Scored →
//! Done`, with early exits to `Done` when discovery or scraping comes back
//! empty. Early exits fill the report and leave `success` false; only the
//! path that completes through `Scored` sets it true. Errors never escape
//! to the caller — the boundary catch records them in the report instead.

use crate::artifact::ArtifactStore;
use crate::report::{FactCheckReport, ReportStatus};
use claimlens_common::{Claim, DomainCategory, RecencyCategory};
use claimlens_llm::assess;
use claimlens_llm::traits::LlmClient;
use claimlens_web::{PageScraper, SourceDiscovery};
use std::sync::Arc;

/// Assessment text placed in the report when the recency category is not
/// recognized and the pipeline is never entered.
pub const NOT_RECOGNIZED_MESSAGE: &str = "News type not recognized";

const NO_SOURCES_MESSAGE: &str = "N/A - No trusted sources found";
const NO_CONTENT_MESSAGE: &str = "N/A - No content scraped from trusted URLs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    SourceDiscovery,
    Scraping,
    Synthesis,
    Scored,
    Done,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::SourceDiscovery => "source_discovery",
            Stage::Scraping => "scraping",
            Stage::Synthesis => "synthesis",
            Stage::Scored => "scored",
            Stage::Done => "done",
        }
    }
}

/// Coordinates source discovery, scraping, and assessment into a
/// [`FactCheckReport`].
///
/// Collaborators are injected behind trait objects: production wires in the
/// search gateway, scrape engine, and a hosted LLM client; tests substitute
/// stubs. There is no shared mutable state between concurrent runs.
pub struct FactChecker {
    gateway: Arc<dyn SourceDiscovery>,
    scraper: Arc<dyn PageScraper>,
    llm: Arc<dyn LlmClient>,
    artifacts: Option<ArtifactStore>,
}

impl FactChecker {
    pub fn new(
        gateway: Arc<dyn SourceDiscovery>,
        scraper: Arc<dyn PageScraper>,
        llm: Arc<dyn LlmClient>,
        artifacts: Option<ArtifactStore>,
    ) -> Self {
        Self {
            gateway,
            scraper,
            llm,
            artifacts,
        }
    }

    /// Run a fact-check. Never returns an error: every failure mode is
    /// reported through the returned report's fields.
    pub async fn check(
        &self,
        recency_raw: &str,
        claim_text: &str,
        domain_raw: &str,
        claim_id: Option<String>,
    ) -> FactCheckReport {
        let mut report = FactCheckReport::new(claim_id.clone());

        let Some(recency) = RecencyCategory::parse(recency_raw) else {
            tracing::warn!(
                target: "factcheck",
                category = %recency_raw,
                "recency category not recognized; skipping pipeline"
            );
            report.fact_check_assessment = NOT_RECOGNIZED_MESSAGE.to_string();
            report.status = ReportStatus::UnrecognizedCategory;
            return report;
        };

        let domain = DomainCategory::parse(domain_raw);
        let claim = Claim::new(claim_text.to_string(), domain, recency, claim_id);

        let claim_snippet: String = claim.text.chars().take(100).collect();
        tracing::info!(
            target: "factcheck",
            id = %claim.id,
            %recency,
            %domain,
            claim = %claim_snippet,
            "starting fact-check"
        );

        if let Err(e) = self.drive(&claim, &mut report).await {
            tracing::error!(target: "factcheck", id = %claim.id, error = %e, "pipeline failed");
            report
                .processing_errors
                .push(format!("Fact-checking failed: {e}"));
            report.success = false;
            report.status = ReportStatus::PipelineError;
        }

        report
    }

    /// The pipeline body. Partial progress stays in the report even when an
    /// error propagates out to the boundary catch in [`FactChecker::check`].
    async fn drive(&self, claim: &Claim, report: &mut FactCheckReport) -> anyhow::Result<()> {
        let mut stage = Stage::Start;

        stage = self.advance(claim, stage, Stage::SourceDiscovery);
        let urls = self
            .gateway
            .discover(&claim.text, claim.domain, claim.recency)
            .await;
        report.trusted_urls = urls.clone();

        if urls.is_empty() {
            report
                .processing_errors
                .push("No trusted sources found".to_string());
            report.fact_check_assessment = NO_SOURCES_MESSAGE.to_string();
            report.trust_score = 0.0;
            report.status = ReportStatus::NoSourcesFound;
            self.advance(claim, stage, Stage::Done);
            return Ok(());
        }
        report.sources_used = urls.clone();

        stage = self.advance(claim, stage, Stage::Scraping);
        let contents = self.scraper.scrape_all(&urls).await;
        report.set_scraped_contents(contents);

        if report.scraped_contents.is_empty() {
            report
                .processing_errors
                .push("Could not scrape content from any trusted URLs".to_string());
            report.fact_check_assessment = NO_CONTENT_MESSAGE.to_string();
            report.trust_score = 0.0;
            report.status = ReportStatus::NoContentScraped;
            self.advance(claim, stage, Stage::Done);
            return Ok(());
        }

        stage = self.advance(claim, stage, Stage::Synthesis);
        let llm = self.llm.as_ref();
        report.summarized_answer = assess::summarize(llm, &report.scraped_contents).await;
        report.further_education_suggestions =
            assess::education_suggestions(llm, &claim.text, claim.domain).await;
        report.fact_check_assessment =
            assess::verdict(llm, &claim.text, &report.scraped_contents, claim.recency).await;

        stage = self.advance(claim, stage, Stage::Scored);
        report.trust_score = assess::trust_score(&report.fact_check_assessment, claim.recency);

        if let Some(store) = &self.artifacts {
            match store.persist(claim, report) {
                Ok(path) => {
                    report
                        .debug_data
                        .insert("saved_file".to_string(), path.display().to_string());
                }
                Err(e) => {
                    tracing::warn!(
                        target: "factcheck",
                        id = %claim.id,
                        error = %e,
                        "failed to persist debug artifact"
                    );
                }
            }
        }

        report.success = true;
        report.status = ReportStatus::Completed;
        self.advance(claim, stage, Stage::Done);

        tracing::info!(
            target: "factcheck",
            id = %claim.id,
            trust_score = report.trust_score,
            scraped = report.scraped_content_count,
            "fact-check completed"
        );
        Ok(())
    }

    fn advance(&self, claim: &Claim, from: Stage, to: Stage) -> Stage {
        tracing::debug!(
            target: "factcheck",
            id = %claim.id,
            from = from.as_str(),
            to = to.as_str(),
            "pipeline transition"
        );
        to
    }
}

/// Entry point matching the inbound request-handler contract: categories
/// arrive as the free-form strings the classifier produced.
pub async fn initialize_fact_checker(
    checker: &FactChecker,
    recency_category: &str,
    claim_text: &str,
    domain_category: &str,
    claim_id: Option<String>,
) -> FactCheckReport {
    checker
        .check(recency_category, claim_text, domain_category, claim_id)
        .await
}
