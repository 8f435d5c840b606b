//! The shared status record.
//!
//! The record is the only channel between the orchestrator and the
//! presentation surfaces. It is always replaced as a whole.

use serde::{Deserialize, Serialize};

use crate::text::truncate_chars;

/// Maximum characters of context kept in the record for previews.
pub const CONTEXT_PREVIEW_LIMIT: usize = 200;

/// Request lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No request has been made yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request produced a result.
    Success,
    /// The last request failed.
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        };
        f.write_str(s)
    }
}

/// Snapshot of the current request, as seen by every surface.
///
/// Fields are private so that only the constructors below can build a
/// record; each one upholds the status/payload pairing. Records read back
/// from storage may still be malformed, see [`StatusRecord::is_consistent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(default)]
    status: Status,
    #[serde(default)]
    selection: Option<String>,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    context: Option<String>,
}

impl StatusRecord {
    /// The record written on installation.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A request for `selection` has started.
    pub fn loading(selection: impl Into<String>) -> Self {
        Self {
            status: Status::Loading,
            selection: Some(selection.into()),
            ..Self::default()
        }
    }

    /// A request finished with a Markdown result.
    pub fn success(
        selection: impl Into<String>,
        data: impl Into<String>,
        context: Option<&str>,
    ) -> Self {
        Self {
            status: Status::Success,
            selection: Some(selection.into()),
            data: Some(data.into()),
            error: None,
            context: preview(context),
        }
    }

    /// A request failed with a human-readable message.
    pub fn failure(
        selection: impl Into<String>,
        error: impl Into<String>,
        context: Option<&str>,
    ) -> Self {
        Self {
            status: Status::Error,
            selection: Some(selection.into()),
            data: None,
            error: Some(error.into()),
            context: preview(context),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Check the status/payload invariants.
    ///
    /// Returns a description of the first violation found.
    pub fn check(&self) -> Result<(), String> {
        match self.status {
            Status::Idle | Status::Loading => {
                if self.data.is_some() || self.error.is_some() {
                    return Err(format!("{} record carries data or error", self.status));
                }
            }
            Status::Success => {
                if self.data.is_none() || self.error.is_some() {
                    return Err("success record must have data and no error".to_string());
                }
            }
            Status::Error => {
                if self.error.is_none() || self.data.is_some() {
                    return Err("error record must have an error and no data".to_string());
                }
            }
        }
        if self.status != Status::Idle && self.selection.is_none() {
            return Err(format!("{} record has no selection", self.status));
        }
        Ok(())
    }

    pub fn is_consistent(&self) -> bool {
        self.check().is_ok()
    }
}

fn preview(context: Option<&str>) -> Option<String> {
    context
        .filter(|c| !c.is_empty())
        .map(|c| truncate_chars(c, CONTEXT_PREVIEW_LIMIT))
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
