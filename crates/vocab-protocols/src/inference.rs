//! Remote inference client trait.

use async_trait::async_trait;

use crate::error::InferenceError;

/// A parsed answer from the remote model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// Markdown text of the first candidate.
    Text(String),
    /// The prompt was blocked; no candidate was produced.
    Blocked { reason: String },
}

impl InferenceOutcome {
    /// Markdown shown to the user.
    ///
    /// A blocked prompt still yields a result: a notice naming the reason.
    pub fn into_markdown(self) -> String {
        match self {
            InferenceOutcome::Text(text) => text,
            InferenceOutcome::Blocked { reason } => format!(
                "### Response Blocked\n\nThe API declined to answer this request.\n\n**Reason:** {}",
                reason
            ),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, InferenceOutcome::Blocked { .. })
    }
}

/// Client for the remote generative model.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Returns the client ID.
    fn id(&self) -> &str;

    /// Send `prompt` and parse the answer.
    ///
    /// Fails with [`InferenceError::MissingCredential`] without any network
    /// activity when `api_key` is blank.
    async fn infer(&self, prompt: &str, api_key: &str) -> Result<InferenceOutcome, InferenceError>;
}
