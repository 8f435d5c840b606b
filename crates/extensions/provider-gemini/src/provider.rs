//! Gemini inference client implementation.

use async_trait::async_trait;
use tracing::{debug, info};

use vocab_protocols::error::InferenceError;
use vocab_protocols::{InferenceClient, InferenceOutcome};

use crate::client::{GeminiClient, DEFAULT_BASE_URL};
use crate::types::*;

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.4;

/// Output length cap sent with every request.
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Finish reasons that mean a candidate was withheld for policy reasons.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

/// Gemini inference client.
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    /// Create a provider for the public endpoint and default model.
    pub fn new() -> Result<Self, InferenceError> {
        Self::with_url(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }

    /// Create a provider for a specific endpoint and model.
    pub fn with_url(
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, InferenceError> {
        Ok(Self {
            client: GeminiClient::new(base_url)?,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generation_config() -> GenerationConfig {
        GenerationConfig {
            temperature: Some(TEMPERATURE),
            max_output_tokens: Some(MAX_OUTPUT_TOKENS),
        }
    }

    /// Classify a successful response.
    fn interpret_response(
        &self,
        response: GenerateContentResponse,
    ) -> Result<InferenceOutcome, InferenceError> {
        if let Some(candidate) = response.candidates.first() {
            if let Some(text) = candidate.text() {
                let text = text.trim();
                if !text.is_empty() {
                    return Ok(InferenceOutcome::Text(text.to_string()));
                }
            }
        }

        let block_reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| {
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .filter(|r| BLOCKING_FINISH_REASONS.contains(&r.as_str()))
            });

        match block_reason {
            Some(reason) => {
                info!("Gemini blocked the request: {}", reason);
                Ok(InferenceOutcome::Blocked { reason })
            }
            None => Err(InferenceError::UnparseableResponse),
        }
    }
}

#[async_trait]
impl InferenceClient for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn infer(&self, prompt: &str, api_key: &str) -> Result<InferenceOutcome, InferenceError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(InferenceError::MissingCredential);
        }

        debug!("Gemini infer: model={} prompt_chars={}", self.model, prompt.chars().count());

        let request = GenerateContentRequest::from_prompt(prompt, Self::generation_config());
        let response = self
            .client
            .generate_content(&self.model, api_key, &request)
            .await?;
        self.interpret_response(response)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
