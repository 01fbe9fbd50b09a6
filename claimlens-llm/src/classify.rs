//! News classification: one generation call that buckets a news text by
//! temporal shelf-life and misinformation domain, plus a tolerant parser
//! for the model's `News Type: ..., Misinformation Domain: ...` output.

use claimlens_common::{DomainCategory, RecencyCategory, Result};
use regex::Regex;

use crate::traits::LlmClient;

/// Outcome of a classification call. The raw labels are kept alongside the
/// parsed categories so callers can surface what the model actually said.
#[derive(Debug, Clone)]
pub struct Classification {
    pub recency: Option<RecencyCategory>,
    pub domain: DomainCategory,
    pub news_type_label: String,
    pub domain_label: String,
    pub raw: String,
}

/// Classify a news text by recency and misinformation domain.
pub async fn classify_news(llm: &dyn LlmClient, news_text: &str) -> Result<Classification> {
    let prompt = format!(
        "Categorize the following news text into two aspects:\n\
         1. News Type: 'Real-time News' or 'Evergreen News'.\n\
            - Real-time news refers to current events, breaking news, or topics with a short shelf-life.\n\
            - Evergreen news refers to content that remains relevant over a long period, often educational, how-to, or historical.\n\
         2. Misinformation Domain: 'Health', 'Finance', 'General', or 'Other'.\n\
            - Health misinformation relates to medical treatments, diseases, or public health.\n\
            - Finance misinformation relates to investments, economic claims, or financial advice.\n\
            - General misinformation covers social, political, or miscellaneous topics not falling into Health or Finance.\n\
            - Other is for categories not explicitly listed.\n\n\
         News Text: {news_text}\n\n\
         Please provide the output in the format: News Type: [Category], Misinformation Domain: [Category]."
    );

    let resp = llm.generate(&prompt, None, Some(60), Some(0.2)).await?;
    let raw = resp.text.trim().to_string();

    let (news_type_label, domain_label) = parse_classifier_output(&raw);
    tracing::info!(
        target: "llm.classify",
        news_type = %news_type_label,
        domain = %domain_label,
        "classified news text"
    );

    Ok(Classification {
        recency: RecencyCategory::parse(&news_type_label),
        domain: DomainCategory::parse(&domain_label),
        news_type_label,
        domain_label,
        raw,
    })
}

/// Pull the two labels out of the model's free-text answer. Missing pieces
/// degrade to `"N/A"` rather than failing the whole item.
fn parse_classifier_output(raw: &str) -> (String, String) {
    let news_type = Regex::new(r"News Type:\s*\[?([^,\]\n]+)\]?")
        .ok()
        .and_then(|re| re.captures(raw))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let domain = Regex::new(r"Misinformation Domain:\s*\[?([^,\]\n]+)\]?")
        .ok()
        .and_then(|re| re.captures(raw))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| "N/A".to_string());

    (news_type, domain)
}
