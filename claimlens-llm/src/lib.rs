//! Provider-agnostic LLM integration for claimlens.
//!
//! This crate exposes a common [`traits::LlmClient`] interface, concrete
//! provider implementations for Gemini and OpenAI, the news classification
//! helper ([`classify`]), and the fact-check assessment engine ([`assess`]).
//! A convenience function initializes a client from a
//! [`claimlens_common::LlmConfig`].
//!
//! # Examples
//! ```no_run
//! use claimlens_common::{LlmConfig, Result};
//! use claimlens_llm::ensure_llm_ready;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let cfg = LlmConfig::Gemini {
//!     api_key: "key".into(),
//!     model: claimlens_llm::DEFAULT_GEMINI_MODEL.into(),
//! };
//! let client = ensure_llm_ready(&cfg)?;
//! assert!(!client.model_name().is_empty());
//! # Ok(())
//! # }
//! ```
pub mod assess;
pub mod classify;
#[cfg(feature = "gemini")]
pub mod gemini;
#[cfg(feature = "openai")]
pub mod openai;
pub mod traits;

use claimlens_common::{ClaimlensError, LlmConfig};
use std::sync::Arc;
use traits::LlmClient;

/// Default model recommendations for fact-check tasks
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Build an LLM client from configuration.
pub fn ensure_llm_ready(
    config: &LlmConfig,
) -> claimlens_common::Result<Arc<dyn LlmClient + Send + Sync + 'static>> {
    match config {
        #[cfg(feature = "gemini")]
        LlmConfig::Gemini { api_key, model } => {
            let client = gemini::GeminiClient::new(api_key.clone(), model.clone())?;
            Ok(Arc::new(client))
        }
        #[cfg(feature = "openai")]
        LlmConfig::OpenAi {
            api_key,
            model,
            base_url,
        } => {
            let client =
                openai::OpenAiClient::new(api_key.clone(), model.clone(), base_url.clone())?;
            Ok(Arc::new(client))
        }
        LlmConfig::None => Err(ClaimlensError::Config("No LLM configured".to_string())),
        #[allow(unreachable_patterns)]
        _ => Err(ClaimlensError::Config(
            "LLM provider not enabled".to_string(),
        )),
    }
}
