//! Common types and utilities shared across claimlens crates.
//!
//! This crate defines the claim/category domain types, provider-agnostic LLM
//! configuration, observability helpers, and shared error types used
//! throughout the claimlens workspace. It is intentionally lightweight so
//! that every crate can depend on it without heavy transitive costs.
//!
//! # Overview
//!
//! - [`Claim`], [`DomainCategory`], [`RecencyCategory`]: the input unit of
//!   the fact-check pipeline and its classification axes
//! - [`LlmConfig`]: provider-agnostic LLM configuration
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`ClaimlensError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use claimlens_common::{Claim, DomainCategory, RecencyCategory};
//!
//! let claim = Claim::new(
//!     "Eating rice makes you fat".to_string(),
//!     DomainCategory::Health,
//!     RecencyCategory::Evergreen,
//!     None,
//! );
//! assert_eq!(claim.domain, DomainCategory::Health);
//! assert!(!claim.id.is_empty());
//! ```
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod observability;

/// Topical bucket for a claim. Selects the trusted-source list used during
/// source discovery; anything outside the known buckets lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainCategory {
    Health,
    Finance,
    General,
    Other,
}

impl DomainCategory {
    /// Lenient parser for classifier output. Unknown text maps to `Other`;
    /// catalog lookups for `Other` fall back to the General list, so no
    /// input can make a lookup fail.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.contains("health") {
            Self::Health
        } else if lower.contains("finance") {
            Self::Finance
        } else if lower.contains("general") {
            Self::General
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Finance => "Finance",
            Self::General => "General",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temporal shelf-life of a claim: durable topics vs breaking/current events.
///
/// The two variants drive different source catalogs, result caps, and
/// verdict vocabularies downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecencyCategory {
    Evergreen,
    Realtime,
}

impl RecencyCategory {
    /// Parse the free-form category string the classifier emits
    /// (`"Evergreen News"`, `"Real-time News"`, ...). Returns `None` for
    /// anything unrecognized; callers must treat that as a hard guard, not
    /// a default.
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower.starts_with("evergreen") {
            Some(Self::Evergreen)
        } else if lower.starts_with("real-time")
            || lower.starts_with("realtime")
            || lower.starts_with("real time")
        {
            Some(Self::Realtime)
        } else {
            None
        }
    }

    /// Maximum number of trusted URLs collected during source discovery.
    pub fn source_cap(&self) -> usize {
        match self {
            Self::Evergreen => 5,
            Self::Realtime => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evergreen => "Evergreen",
            Self::Realtime => "Real-time",
        }
    }
}

impl std::fmt::Display for RecencyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The input unit of a fact-check run. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: String,
    pub text: String,
    pub domain: DomainCategory,
    pub recency: RecencyCategory,
}

impl Claim {
    pub fn new(
        text: String,
        domain: DomainCategory,
        recency: RecencyCategory,
        id: Option<String>,
    ) -> Self {
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            text,
            domain,
            recency,
        }
    }
}

/// Configuration for an LLM provider used by the pipeline.
///
/// Feature flags control which variants are compiled in. See the
/// `claimlens-llm` crate for concrete client implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LlmConfig {
    #[cfg(feature = "gemini")]
    Gemini { api_key: String, model: String },
    #[cfg(feature = "openai")]
    OpenAi {
        api_key: String,
        model: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    None,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::None
    }
}

/// Error types used across the claimlens system.
#[derive(thiserror::Error, Debug)]
pub enum ClaimlensError {
    /// An LLM provider failed to complete a requested generation.
    #[error("LLM error: {0}")]
    Llm(String),

    /// A web collaborator (search, scrape) reported an error.
    #[error("Web error: {0}")]
    Web(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`ClaimlensError`].
pub type Result<T> = std::result::Result<T, ClaimlensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_parses_classifier_phrasing() {
        assert_eq!(
            RecencyCategory::parse("Evergreen News"),
            Some(RecencyCategory::Evergreen)
        );
        assert_eq!(
            RecencyCategory::parse("Real-time News"),
            Some(RecencyCategory::Realtime)
        );
        assert_eq!(
            RecencyCategory::parse("realtime"),
            Some(RecencyCategory::Realtime)
        );
    }

    #[test]
    fn recency_rejects_unknown_categories() {
        assert_eq!(RecencyCategory::parse(""), None);
        assert_eq!(RecencyCategory::parse("N/A"), None);
        assert_eq!(RecencyCategory::parse("Opinion"), None);
    }

    #[test]
    fn domain_parse_falls_back_to_other() {
        assert_eq!(DomainCategory::parse("Health"), DomainCategory::Health);
        assert_eq!(DomainCategory::parse("  finance "), DomainCategory::Finance);
        assert_eq!(DomainCategory::parse("Sports"), DomainCategory::Other);
    }

    #[test]
    fn claim_gets_generated_id_when_absent() {
        let claim = Claim::new(
            "text".into(),
            DomainCategory::General,
            RecencyCategory::Evergreen,
            None,
        );
        assert!(!claim.id.is_empty());

        let claim = Claim::new(
            "text".into(),
            DomainCategory::General,
            RecencyCategory::Evergreen,
            Some("news-7".into()),
        );
        assert_eq!(claim.id, "news-7");
    }
}
