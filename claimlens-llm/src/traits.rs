use async_trait::async_trait;
use claimlens_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub model: Option<String>,
    pub tokens_used: Option<u32>,
}

#[derive(thiserror::Error, Debug)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A hosted generative-text model.
///
/// The fact-check pipeline only ever needs prompt-in/text-out generation;
/// everything domain-specific (prompt templates, fallbacks, score mapping)
/// lives in the [`crate::assess`] and [`crate::classify`] modules so any
/// provider can back them.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a response to the given prompt with optional system prompt.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse>;

    /// Check if the LLM service is available.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
