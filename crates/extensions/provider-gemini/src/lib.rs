//! # vocab-provider-gemini
//!
//! Google Gemini `generateContent` client for vocab-helper.

mod client;
mod provider;
mod types;

pub use client::{GeminiClient, DEFAULT_BASE_URL};
pub use provider::{GeminiProvider, DEFAULT_MODEL, MAX_OUTPUT_TOKENS, TEMPERATURE};
pub use types::*;
