//! Store traits: the shared status cell and the credential store.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::{CredentialError, StoreError};
use crate::status::StatusRecord;

/// Key under which the Gemini API key is persisted.
pub const CREDENTIAL_KEY: &str = "geminiApiKey";

/// Observable status record.
///
/// Writes replace the whole record; readers never observe a partial update.
/// The last write wins.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Read the current record.
    async fn read(&self) -> Result<StatusRecord, StoreError>;

    /// Replace the current record and notify subscribers.
    async fn write(&self, record: StatusRecord) -> Result<(), StoreError>;

    /// Subscribe to record changes.
    fn subscribe(&self) -> watch::Receiver<StatusRecord>;
}

/// Storage for the user's API key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Get the stored key, if any.
    async fn api_key(&self) -> Result<Option<String>, StoreError>;

    /// Store a key. Surrounding whitespace is trimmed; empty keys are rejected.
    async fn set_api_key(&self, key: &str) -> Result<(), CredentialError>;

    /// Remove the stored key.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Trim a user-supplied key and reject it when nothing is left.
pub fn normalize_api_key(key: &str) -> Result<String, CredentialError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::Empty);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_api_key("  abc123 \n").unwrap(), "abc123");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(normalize_api_key("   "), Err(CredentialError::Empty)));
        assert!(matches!(normalize_api_key(""), Err(CredentialError::Empty)));
    }
}
