//! Remote inference errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Gemini API key is not configured. Set it with the options command.")]
    MissingCredential,

    #[error("API Error ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("Could not parse the response from the API.")]
    UnparseableResponse,

    #[error("Network error: {0}")]
    Network(String),
}

impl InferenceError {
    /// Whether the request failed before anything was sent over the wire.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }
}

#[cfg(test)]
#[path = "inference_tests.rs"]
mod tests;
