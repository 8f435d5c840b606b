//! Context extraction errors.
//!
//! These never reach the user: the orchestrator logs them and continues
//! with an empty context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to load page source: {0}")]
    SourceUnavailable(String),

    #[error("Failed to fetch page: {0}")]
    Fetch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
