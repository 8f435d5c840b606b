//! Orchestrator errors.

use thiserror::Error;

use super::{CredentialError, InferenceError, StoreError};

/// Failures that end a request in the `error` state.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("{0}")]
    Unknown(String),
}

impl From<StoreError> for OrchestratorError {
    fn from(err: StoreError) -> Self {
        Self::Unknown(err.to_string())
    }
}

impl From<CredentialError> for OrchestratorError {
    fn from(err: CredentialError) -> Self {
        Self::Unknown(err.to_string())
    }
}
