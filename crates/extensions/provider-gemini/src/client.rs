//! Gemini API client.

use reqwest::Client;
use tracing::debug;

use vocab_protocols::error::InferenceError;

use crate::types::*;

/// Public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client.
///
/// No request timeout is set; the transport defaults apply.
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .user_agent(concat!("vocab-helper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InferenceError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content (non-streaming).
    ///
    /// The key travels as the `key` query parameter. It is stripped from
    /// transport error messages.
    pub async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InferenceError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| InferenceError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Network(e.without_url().to_string()))?;

        debug!("Gemini response: status={} bytes={}", status, body.len());

        if !status.is_success() {
            return Err(InferenceError::RemoteRejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("Unparseable Gemini response: {}", e);
            InferenceError::UnparseableResponse
        })
    }
}

/// Human-readable reason for a non-success response.
///
/// Prefers the structured `error.message`, then the raw body, then the
/// status line.
pub(crate) fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<GeminiError>(body) {
        if !error.error.message.trim().is_empty() {
            return error.error.message;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status.to_string()
}
