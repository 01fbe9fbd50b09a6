//! Assessment engine: the three generation calls of the fact-check pipeline
//! (summary, education suggestions, verdict) and the trust-score rules.
//!
//! Each call owns its prompt template, generation parameters, and fallback
//! text. A failing call degrades to its fallback and never aborts the
//! sibling calls; the orchestrator keeps going with whatever text came back.

use claimlens_common::{DomainCategory, RecencyCategory};

use crate::traits::LlmClient;

pub const SUMMARY_FALLBACK: &str = "Summarization failed due to an error.";
pub const EDUCATION_FALLBACK: &str = "Further education suggestions could not be generated.";
pub const VERDICT_FALLBACK: &str = "Fact-checking failed due to an error.";

/// Character budgets for scraped content stuffed into prompts. Real-time
/// verdicts get a larger window since wire coverage is more fragmented.
const SUMMARY_CONTENT_BUDGET: usize = 3000;
const EVERGREEN_VERDICT_BUDGET: usize = 2000;
const REALTIME_VERDICT_BUDGET: usize = 4000;

/// Summarize corroborating content scraped from trusted sources.
pub async fn summarize(llm: &dyn LlmClient, contents: &[String]) -> String {
    let combined = clip_chars(&contents.join("\n\n"), SUMMARY_CONTENT_BUDGET);

    let prompt = format!(
        "Based on the following content from trusted sources, provide a concise \
         summary of the key information related to the topic.\n\n\
         Trusted Sources Content:\n{combined}\n\nSummary:"
    );

    match llm.generate(&prompt, None, Some(500), Some(0.2)).await {
        Ok(resp) => resp.text.trim().to_string(),
        Err(e) => {
            tracing::error!(target: "llm.assess", error = %e, "summarization call failed");
            SUMMARY_FALLBACK.to_string()
        }
    }
}

/// Generate 3-5 media-literacy suggestions for the claim's topic.
pub async fn education_suggestions(
    llm: &dyn LlmClient,
    claim_text: &str,
    domain: DomainCategory,
) -> String {
    let prompt = format!(
        "Given the original news topic: \"{claim_text}\" (categorized as {domain} \
         misinformation), suggest 3-5 key areas or reputable resources for an \
         individual to further educate themselves to avoid similar misinformation \
         in the future. Focus on critical thinking, media literacy, and \
         understanding the {domain} domain.\n\nSuggestions:"
    );

    match llm.generate(&prompt, None, Some(300), Some(0.3)).await {
        Ok(resp) => resp.text.trim().to_string(),
        Err(e) => {
            tracing::error!(target: "llm.assess", error = %e, "education call failed");
            EDUCATION_FALLBACK.to_string()
        }
    }
}

/// Produce the verdict comparing the claim against corroborating content.
///
/// The vocabulary the model is asked for differs by recency: evergreen
/// verdicts use the fixed `True` / `Potentially Misleading` / `False`
/// wording, real-time verdicts use looser lowercase language plus free-form
/// reasoning. [`trust_score`] understands both.
pub async fn verdict(
    llm: &dyn LlmClient,
    claim_text: &str,
    contents: &[String],
    recency: RecencyCategory,
) -> String {
    let (prompt, max_tokens, temperature) = match recency {
        RecencyCategory::Evergreen => {
            let combined = clip_chars(&contents.join(" "), EVERGREEN_VERDICT_BUDGET);
            let prompt = format!(
                "Given the following original news text and content from trusted \
                 sources, analyze if the original news text contains misinformation \
                 related to evergreen topics. Focus on factual accuracy and \
                 consistency with the trusted sources.\n\n\
                 Original News Text: {claim_text}\n\n\
                 Trusted Sources Content: {combined}\n\n\
                 Based on the comparison, state clearly if the Original News Text is \
                 likely 'True', 'Potentially Misleading', or 'False'. Also, provide \
                 a brief explanation for your assessment."
            );
            (prompt, 300, 0.1)
        }
        RecencyCategory::Realtime => {
            let combined = clip_chars(&contents.join(" "), REALTIME_VERDICT_BUDGET);
            let prompt = format!(
                "Given the following breaking news text and live coverage from \
                 trusted outlets, assess whether the breaking news text is \
                 consistent with the coverage so far. Coverage of developing events \
                 may be incomplete; weigh agreement across outlets.\n\n\
                 Breaking News Text: {claim_text}\n\n\
                 Live Coverage Content: {combined}\n\n\
                 State clearly whether the Breaking News Text appears 'true', \
                 'needs verification', or 'false' based on current coverage, and \
                 explain your reasoning."
            );
            (prompt, 400, 0.2)
        }
    };

    match llm
        .generate(&prompt, None, Some(max_tokens), Some(temperature))
        .await
    {
        Ok(resp) => resp.text.trim().to_string(),
        Err(e) => {
            tracing::error!(target: "llm.assess", error = %e, "verdict call failed");
            VERDICT_FALLBACK.to_string()
        }
    }
}

/// One row of the verdict-keyword table: first matching row wins.
struct ScoreRule {
    keyword: &'static str,
    score: f64,
}

// Order matters: 'Potentially Misleading' must not be shadowed, and a
// verdict matching none of the keywords scores 0.0.
const EVERGREEN_RULES: &[ScoreRule] = &[
    ScoreRule { keyword: "True", score: 9.0 },
    ScoreRule { keyword: "Potentially Misleading", score: 5.0 },
    ScoreRule { keyword: "False", score: 1.0 },
];

const REALTIME_RULES: &[ScoreRule] = &[
    ScoreRule { keyword: "true", score: 8.0 },
    ScoreRule { keyword: "needs verification", score: 4.0 },
    ScoreRule { keyword: "false", score: 1.0 },
];

/// Derive the numeric trust score from a verdict string.
///
/// Pure substring matching against an ordered rule table — the external
/// contract is a fixed score per keyword, with 0.0 when nothing matches.
/// Evergreen matching is case-sensitive (the vocabulary is capitalized by
/// construction); real-time matching is case-insensitive.
pub fn trust_score(verdict_text: &str, recency: RecencyCategory) -> f64 {
    match recency {
        RecencyCategory::Evergreen => EVERGREEN_RULES
            .iter()
            .find(|rule| verdict_text.contains(rule.keyword))
            .map(|rule| rule.score)
            .unwrap_or(0.0),
        RecencyCategory::Realtime => {
            let lower = verdict_text.to_lowercase();
            REALTIME_RULES
                .iter()
                .find(|rule| lower.contains(rule.keyword))
                .map(|rule| rule.score)
                .unwrap_or(0.0)
        }
    }
}

/// Truncate to a character budget without splitting a UTF-8 code point.
fn clip_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evergreen_scores_follow_keyword_precedence() {
        assert_eq!(
            trust_score("The claim is True, supported by all sources.", RecencyCategory::Evergreen),
            9.0
        );
        assert_eq!(
            trust_score(
                "Potentially Misleading: the sources partially disagree.",
                RecencyCategory::Evergreen
            ),
            5.0
        );
        assert_eq!(
            trust_score("This is False according to the sources.", RecencyCategory::Evergreen),
            1.0
        );
        assert_eq!(trust_score(VERDICT_FALLBACK, RecencyCategory::Evergreen), 0.0);
        assert_eq!(trust_score("", RecencyCategory::Evergreen), 0.0);
    }

    #[test]
    fn evergreen_matching_is_case_sensitive() {
        // The lowercase word alone never matches the evergreen vocabulary.
        assert_eq!(
            trust_score("probably true but unsourced", RecencyCategory::Evergreen),
            0.0
        );
    }

    #[test]
    fn realtime_scores_are_case_insensitive() {
        assert_eq!(
            trust_score("This appears TRUE per live coverage.", RecencyCategory::Realtime),
            8.0
        );
        assert_eq!(
            trust_score(
                "The report Needs Verification; outlets conflict.",
                RecencyCategory::Realtime
            ),
            4.0
        );
        assert_eq!(
            trust_score("Coverage shows this is false.", RecencyCategory::Realtime),
            1.0
        );
        assert_eq!(trust_score("no keywords here", RecencyCategory::Realtime), 0.0);
    }

    #[test]
    fn clip_respects_char_boundaries() {
        let s = "héllo wörld";
        assert_eq!(clip_chars(s, 5), "héllo");
        assert_eq!(clip_chars(s, 100), s);
    }
}
