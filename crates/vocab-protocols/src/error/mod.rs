//! Error types shared across the vocab-helper workspace.

mod credential;
mod extract;
mod inference;
mod orchestrator;
mod store;

pub use credential::*;
pub use extract::*;
pub use inference::*;
pub use orchestrator::*;
pub use store::*;
