//! Credential errors.

use thiserror::Error;

use super::StoreError;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API Key cannot be empty.")]
    Empty,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_message() {
        assert_eq!(CredentialError::Empty.to_string(), "API Key cannot be empty.");
    }

    #[test]
    fn test_store_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CredentialError::from(StoreError::from(io));
        assert!(err.to_string().contains("denied"));
    }
}
