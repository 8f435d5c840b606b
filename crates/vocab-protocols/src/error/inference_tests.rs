use super::*;

#[test]
fn test_missing_credential_message() {
    let err = InferenceError::MissingCredential;
    assert!(err.to_string().contains("not configured"));
    assert!(err.is_local());
}

#[test]
fn test_remote_rejected_includes_status_and_message() {
    let err = InferenceError::RemoteRejected {
        status: 429,
        message: "quota exceeded".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("429"));
    assert!(display.contains("quota exceeded"));
    assert!(!err.is_local());
}

#[test]
fn test_unparseable_response() {
    let err = InferenceError::UnparseableResponse;
    assert!(err.to_string().contains("parse"));
}

#[test]
fn test_network_error() {
    let err = InferenceError::Network("connection refused".to_string());
    assert!(err.to_string().contains("Network error"));
    assert!(err.to_string().contains("connection refused"));
}
