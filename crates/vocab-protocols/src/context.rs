//! Selection events and the context extractor trait.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ExtractError;

/// Character cap for context taken from a block-level ancestor.
pub const PRIMARY_CONTEXT_LIMIT: usize = 1500;

/// Character cap for context taken from the anchor's parent.
pub const FALLBACK_CONTEXT_LIMIT: usize = 1000;

/// Where the page holding the selection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// HTML file on disk.
    File(PathBuf),
    /// Page fetched over HTTP(S).
    Url(String),
    /// HTML held in memory.
    Html(String),
}

impl std::fmt::Display for PageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSource::File(path) => write!(f, "file:{}", path.display()),
            PageSource::Url(url) => f.write_str(url),
            PageSource::Html(html) => write!(f, "inline html ({} bytes)", html.len()),
        }
    }
}

/// A user's request to define some selected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    selected_text: String,
    source: PageSource,
    occurrence: usize,
}

impl SelectionEvent {
    /// Build an event from raw selected text.
    ///
    /// Returns `None` when the selection is blank after trimming; no request
    /// is raised in that case.
    pub fn new(selected_text: &str, source: PageSource) -> Option<Self> {
        let trimmed = selected_text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            selected_text: trimmed.to_string(),
            source,
            occurrence: 0,
        })
    }

    /// Anchor on the n-th (0-based) occurrence of the text in the page.
    pub fn with_occurrence(mut self, occurrence: usize) -> Self {
        self.occurrence = occurrence;
        self
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    pub fn occurrence(&self) -> usize {
        self.occurrence
    }
}

/// Text surrounding a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSnippet {
    pub text: String,
}

impl ContextSnippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Derives a bounded snippet of surrounding text for a selection.
#[async_trait]
pub trait ContextExtractor: Send + Sync {
    async fn extract(&self, event: &SelectionEvent) -> Result<ContextSnippet, ExtractError>;
}
