//! What the popup shows for a status record.

use std::fmt;

use vocab_protocols::{Status, StatusRecord};

const UNKNOWN_ERROR: &str = "An unknown error occurred.";
const INCOMPLETE_SUCCESS: &str = "Received success status but no data or selection.";

/// Presentation state derived from a [`StatusRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupView {
    NoSelection,
    Loading {
        selection: String,
    },
    Error {
        message: String,
        selection: String,
    },
    Results {
        selection: String,
        markdown: String,
        context_preview: Option<String>,
    },
}

impl PopupView {
    pub fn from_record(record: &StatusRecord) -> Self {
        match record.status() {
            Status::Idle => PopupView::NoSelection,
            Status::Loading => PopupView::Loading {
                selection: record.selection().unwrap_or("...").to_string(),
            },
            Status::Error => PopupView::Error {
                message: record.error().unwrap_or(UNKNOWN_ERROR).to_string(),
                selection: record.selection().unwrap_or("N/A").to_string(),
            },
            Status::Success => match (record.data(), record.selection()) {
                (Some(data), Some(selection)) => PopupView::Results {
                    selection: selection.to_string(),
                    markdown: data.to_string(),
                    context_preview: record.context().map(str::to_string),
                },
                _ => PopupView::Error {
                    message: INCOMPLETE_SUCCESS.to_string(),
                    selection: record.selection().unwrap_or("N/A").to_string(),
                },
            },
        }
    }

    /// Raw Markdown of a result, for copying.
    pub fn markdown(&self) -> Option<&str> {
        match self {
            PopupView::Results { markdown, .. } => Some(markdown),
            _ => None,
        }
    }
}

impl fmt::Display for PopupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupView::NoSelection => {
                f.write_str("No text selected. Run `define` with a selection to look it up.")
            }
            PopupView::Loading { selection } => write!(f, "Defining \"{}\"...", selection),
            PopupView::Error { message, selection } => {
                write!(f, "Error: {}\nSelection: {}", message, selection)
            }
            PopupView::Results {
                selection,
                markdown,
                context_preview,
            } => {
                write!(f, "{}\n\n{}", selection, markdown)?;
                if let Some(preview) = context_preview {
                    write!(f, "\n\nContext: \"{}\"", preview)?;
                }
                Ok(())
            }
        }
    }
}
