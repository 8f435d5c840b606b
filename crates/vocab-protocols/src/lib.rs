//! # vocab-protocols
//!
//! Shared definitions for the vocab-helper workspace.
//! Contains only types and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`StatusStore`] - Observable, wholesale-written status record cell
//! - [`CredentialStore`] - Storage for the Gemini API key
//! - [`InferenceClient`] - Remote generative model client
//! - [`ContextExtractor`] - Derives surrounding text for a selection

pub mod context;
pub mod error;
pub mod inference;
pub mod status;
pub mod store;
pub mod text;

pub use context::{
    ContextExtractor, ContextSnippet, PageSource, SelectionEvent, FALLBACK_CONTEXT_LIMIT,
    PRIMARY_CONTEXT_LIMIT,
};
pub use error::{CredentialError, ExtractError, InferenceError, OrchestratorError, StoreError};
pub use inference::{InferenceClient, InferenceOutcome};
pub use status::{Status, StatusRecord, CONTEXT_PREVIEW_LIMIT};
pub use store::{normalize_api_key, CredentialStore, StatusStore, CREDENTIAL_KEY};
