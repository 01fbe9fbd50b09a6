use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use claimlens_common::{ClaimlensError, Result};
use claimlens_http::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

pub struct OpenAiClient {
    client: HttpClient,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
pub struct ResponsesApiRequest {
    model: String,
    input: String,
    instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesApiResponse {
    pub id: String,
    pub status: String,
    pub model: String,
    #[serde(default)]
    pub output: Vec<ResponseMessage>,
}

/// One element in the `output` array
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ResponseContent>,
}

/// One part of the message `content`
#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl OpenAiClient {
    /// Create a new client for the given API key and model. An alternate
    /// base URL supports OpenAI-compatible gateways.
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Result<Self> {
        let base = base_url.unwrap_or_else(|| OPENAI_API_BASE.to_string());
        let client = HttpClient::new(&base)
            .map_err(|e| ClaimlensError::Llm(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let instructions = system_prompt
            .unwrap_or("You are an objective, unbiased researcher.")
            .to_string();

        let req = ResponsesApiRequest {
            model: self.model.clone(),
            input: prompt.to_string(),
            instructions,
            max_output_tokens: max_tokens,
            temperature,
        };

        let resp: ResponsesApiResponse = self
            .client
            .post_json("responses", Some(&self.api_key), &req)
            .await
            .map_err(http_to_claimlens)?;

        let text = resp
            .output
            .iter()
            .flat_map(|msg| &msg.content)
            .find(|c| c.kind == "output_text")
            .map(|c| c.text.clone())
            .unwrap_or_default();

        Ok(LlmResponse {
            text,
            model: Some(resp.model),
            tokens_used: None,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let test_prompt = "Respond with just 'OK'";

        match self.generate(test_prompt, None, Some(5), Some(0.1)).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("OpenAI health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

fn http_to_claimlens(e: HttpError) -> ClaimlensError {
    ClaimlensError::Llm(format!("{e}"))
}
