use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Terminal state of a fact-check run.
///
/// `success` keeps the legacy semantics (only a run that completed the full
/// pipeline is `true`); the status distinguishes "legitimately no data
/// found" from an actual pipeline error, which the flag alone cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Initial value while the pipeline runs; never present in a returned
    /// report.
    Pending,
    Completed,
    NoSourcesFound,
    NoContentScraped,
    UnrecognizedCategory,
    PipelineError,
}

/// Structured output of the fact-check pipeline.
///
/// Built incrementally stage by stage and immutable once returned; partial
/// fields populated before a failure are retained, never rolled back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckReport {
    pub news_id: Option<String>,
    pub trusted_urls: Vec<String>,
    pub sources_used: Vec<String>,
    pub scraped_contents: Vec<String>,
    pub scraped_content_count: usize,
    pub summarized_answer: String,
    pub fact_check_assessment: String,
    pub further_education_suggestions: String,
    pub trust_score: f64,
    pub processing_errors: Vec<String>,
    pub success: bool,
    pub status: ReportStatus,
    pub debug_data: BTreeMap<String, String>,
}

impl FactCheckReport {
    pub fn new(news_id: Option<String>) -> Self {
        Self {
            news_id,
            trusted_urls: Vec::new(),
            sources_used: Vec::new(),
            scraped_contents: Vec::new(),
            scraped_content_count: 0,
            summarized_answer: String::new(),
            fact_check_assessment: String::new(),
            further_education_suggestions: String::new(),
            trust_score: 0.0,
            processing_errors: Vec::new(),
            success: false,
            status: ReportStatus::Pending,
            debug_data: BTreeMap::new(),
        }
    }

    /// Record scraped content. The only writer of `scraped_contents`, so the
    /// count can never drift from the list.
    pub fn set_scraped_contents(&mut self, contents: Vec<String>) {
        self.scraped_content_count = contents.len();
        self.scraped_contents = contents;
    }

    /// Serialize for merging into a per-item result object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scraped_count_tracks_contents() {
        let mut report = FactCheckReport::new(Some("n-1".into()));
        assert_eq!(report.scraped_content_count, 0);

        report.set_scraped_contents(vec!["a".into(), "b".into()]);
        assert_eq!(report.scraped_content_count, report.scraped_contents.len());

        report.set_scraped_contents(Vec::new());
        assert_eq!(report.scraped_content_count, 0);
    }

    #[test]
    fn report_serializes_with_snake_case_status() {
        let report = FactCheckReport::new(None);
        let value = report.to_json();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["success"], false);
        assert_eq!(value["trust_score"], 0.0);
    }
}
