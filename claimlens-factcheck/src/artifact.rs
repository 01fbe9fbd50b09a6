//! Debug-artifact persistence: a write-once JSON snapshot of a completed
//! run (inputs plus intermediate results) under a timestamped filename.

use crate::report::FactCheckReport;
use anyhow::Context;
use chrono::{Local, Utc};
use claimlens_common::Claim;
use serde_json::json;
use std::path::{Path, PathBuf};

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Persist the snapshot. Callers treat failure as log-only; a missing
    /// artifact never fails the pipeline.
    pub fn persist(&self, claim: &Claim, report: &FactCheckReport) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create results dir: {}", self.dir.display()))?;

        let snapshot = json!({
            "input_news_text": claim.text,
            "news_type": claim.recency.as_str(),
            "misinformation_domain": claim.domain.as_str(),
            "trusted_urls_found": report.trusted_urls,
            "scraped_contents": report.scraped_contents,
            "trust_score": report.trust_score,
            "fact_check_assessment": report.fact_check_assessment,
            "timestamp": Utc::now().to_rfc3339(),
        });

        let filename = format!(
            "scraped_data_{}_{}.json",
            claim.domain,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.dir.join(filename);

        let body = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, body)
            .with_context(|| format!("failed to write artifact: {}", path.display()))?;

        tracing::info!(target: "factcheck", path = %path.display(), "debug artifact saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_common::{DomainCategory, RecencyCategory};

    #[test]
    fn persists_parseable_snapshot() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path());

        let claim = Claim::new(
            "Eating rice makes you fat".into(),
            DomainCategory::Health,
            RecencyCategory::Evergreen,
            Some("n-1".into()),
        );
        let mut report = FactCheckReport::new(Some("n-1".into()));
        report.trusted_urls = vec!["https://en.wikipedia.org/wiki/Rice".into()];
        report.set_scraped_contents(vec!["rice content".into()]);
        report.trust_score = 9.0;
        report.fact_check_assessment = "True".into();

        let path = store.persist(&claim, &report).unwrap();
        assert!(path.exists());

        let body = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["misinformation_domain"], "Health");
        assert_eq!(value["trust_score"], 9.0);
        assert_eq!(value["scraped_contents"].as_array().unwrap().len(), 1);
    }
}
