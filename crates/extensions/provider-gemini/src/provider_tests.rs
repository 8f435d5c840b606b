use super::*;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

fn candidate_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::text(text)],
            }),
            finish_reason: Some("STOP".to_string()),
            safety_ratings: vec![],
        }],
        prompt_feedback: None,
        usage_metadata: None,
    }
}

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::with_url(server.uri(), DEFAULT_MODEL).unwrap()
}

#[test]
fn test_provider_creation() {
    let provider = GeminiProvider::new().unwrap();
    assert_eq!(provider.id(), "gemini");
    assert_eq!(provider.model(), DEFAULT_MODEL);
}

#[test]
fn test_generation_config_is_fixed() {
    let config = GeminiProvider::generation_config();
    assert_eq!(config.temperature, Some(TEMPERATURE));
    assert_eq!(config.max_output_tokens, Some(MAX_OUTPUT_TOKENS));
}

#[test]
fn test_interpret_candidate_text_is_trimmed() {
    let provider = GeminiProvider::new().unwrap();
    let outcome = provider
        .interpret_response(candidate_response("\n  ### Definition\nEverywhere.  \n"))
        .unwrap();
    assert_eq!(
        outcome,
        InferenceOutcome::Text("### Definition\nEverywhere.".to_string())
    );
}

#[test]
fn test_interpret_uses_first_candidate() {
    let provider = GeminiProvider::new().unwrap();
    let mut response = candidate_response("first");
    response.candidates.extend(candidate_response("second").candidates);
    let outcome = provider.interpret_response(response).unwrap();
    assert_eq!(outcome, InferenceOutcome::Text("first".to_string()));
}

#[test]
fn test_interpret_prompt_block() {
    let provider = GeminiProvider::new().unwrap();
    let response = GenerateContentResponse {
        prompt_feedback: Some(PromptFeedback {
            block_reason: Some("SAFETY".to_string()),
            safety_ratings: vec![],
        }),
        ..Default::default()
    };
    let outcome = provider.interpret_response(response).unwrap();
    assert_eq!(
        outcome,
        InferenceOutcome::Blocked {
            reason: "SAFETY".to_string()
        }
    );
}

#[test]
fn test_interpret_candidate_finish_reason_block() {
    let provider = GeminiProvider::new().unwrap();
    let response = GenerateContentResponse {
        candidates: vec![Candidate {
            content: None,
            finish_reason: Some("RECITATION".to_string()),
            safety_ratings: vec![],
        }],
        ..Default::default()
    };
    let outcome = provider.interpret_response(response).unwrap();
    assert!(outcome.is_blocked());
}

#[test]
fn test_interpret_empty_response_is_unparseable() {
    let provider = GeminiProvider::new().unwrap();
    let result = provider.interpret_response(GenerateContentResponse::default());
    assert!(matches!(result, Err(InferenceError::UnparseableResponse)));
}

#[test]
fn test_interpret_blank_text_is_unparseable() {
    let provider = GeminiProvider::new().unwrap();
    let result = provider.interpret_response(candidate_response("   "));
    assert!(matches!(result, Err(InferenceError::UnparseableResponse)));
}

#[test]
fn test_interpret_max_tokens_without_text_is_unparseable() {
    let provider = GeminiProvider::new().unwrap();
    let response = GenerateContentResponse {
        candidates: vec![Candidate {
            content: None,
            finish_reason: Some("MAX_TOKENS".to_string()),
            safety_ratings: vec![],
        }],
        ..Default::default()
    };
    let result = provider.interpret_response(response);
    assert!(matches!(result, Err(InferenceError::UnparseableResponse)));
}

mod http {
    use super::*;

    #[tokio::test]
    async fn test_infer_success() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "### Definition\nExisting everywhere.\n"}]},
                "finishReason": "STOP"
            }]
        });

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "the prompt"}]}],
                "generationConfig": {"maxOutputTokens": MAX_OUTPUT_TOKENS}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let outcome = provider.infer("the prompt", "test-key").await.unwrap();
        assert_eq!(
            outcome,
            InferenceOutcome::Text("### Definition\nExisting everywhere.".to_string())
        );
    }

    #[tokio::test]
    async fn test_infer_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_string(r#"{"error":{"message":"quota exceeded"}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let err = provider.infer("prompt", "test-key").await.unwrap_err();
        match &err {
            InferenceError::RemoteRejected { status, message } => {
                assert_eq!(*status, 429);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let display = err.to_string();
        assert!(display.contains("429"));
        assert!(display.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_infer_error_with_plain_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let err = provider.infer("prompt", "test-key").await.unwrap_err();
        assert_eq!(err.to_string(), "API Error (500): internal failure");
    }

    #[tokio::test]
    async fn test_infer_error_with_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let err = provider.infer("prompt", "test-key").await.unwrap_err();
        assert!(err.to_string().contains("403 Forbidden"));
    }

    #[tokio::test]
    async fn test_infer_blocked_is_soft_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let outcome = provider.infer("prompt", "test-key").await.unwrap();
        assert!(outcome.is_blocked());
        assert!(outcome.into_markdown().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_infer_unexpected_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"foo": "bar"})),
            )
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let result = provider.infer("prompt", "test-key").await;
        assert!(matches!(result, Err(InferenceError::UnparseableResponse)));
    }

    #[tokio::test]
    async fn test_infer_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let result = provider.infer("prompt", "test-key").await;
        assert!(matches!(result, Err(InferenceError::UnparseableResponse)));
    }

    #[tokio::test]
    async fn test_infer_without_key_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let result = provider.infer("prompt", "  ").await;
        assert!(matches!(result, Err(InferenceError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_network_error_hides_key() {
        // Nothing listens on port 9 on test hosts.
        let provider = GeminiProvider::with_url("http://127.0.0.1:9", DEFAULT_MODEL).unwrap();
        let err = provider.infer("prompt", "super-secret-key").await.unwrap_err();
        assert!(matches!(err, InferenceError::Network(_)));
        assert!(!err.to_string().contains("super-secret-key"));
    }
}
