//! # vocab-core
//!
//! The request pipeline: a selection comes in, a prompt goes out to the
//! inference client and the outcome lands in the status store.

pub mod orchestrator;
pub mod prompt;
pub mod view;

pub use orchestrator::{Completion, Orchestrator};
pub use prompt::{build_prompt, Prompt, CONTEXT_UNAVAILABLE};
pub use view::PopupView;
