//! # vocab-store
//!
//! Stores shared between the orchestrator and the presentation surfaces.
//!
//! ## Features
//!
//! - In-memory and file-backed status records with whole-record writes
//! - Change subscriptions in-process (`watch`) and across processes (`notify`)
//! - Credential storage for the Gemini API key

pub mod credential;
pub mod memory;
pub mod status_file;
pub mod watcher;

pub use credential::{FileCredentialStore, MemoryCredentialStore};
pub use memory::MemoryStatusStore;
pub use status_file::FileStatusStore;
pub use watcher::StatusWatcher;
