//! Integration tests that require a real LLM API
//!
//! These tests are marked with #[ignore] and require environment variables:
//! - GEMINI_API_KEY for Gemini tests
//! - OPENAI_API_KEY for OpenAI tests
//!
//! Run with: cargo test -p veracity-llm --test llm_integration -- --ignored

use std::sync::Arc;
use veracity_llm::{
    GeminiProvider, LlmConfig, LlmError, LlmProvider, LlmRequest, MockProvider, OpenAIProvider,
};

/// Test Gemini provider with real API
#[tokio::test]
#[ignore = "Requires GEMINI_API_KEY"]
async fn test_gemini_real_request() {
    let api_key =
        std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set for this test");

    let provider = GeminiProvider::flash(&api_key);

    let request = LlmRequest::with_role(
        "You are a helpful assistant. Be extremely concise.",
        "What is 2 + 2? Answer with just the number.",
    )
    .temperature(0.0);

    let response = provider.complete(request).await;
    assert!(response.is_ok(), "Request should succeed: {:?}", response);

    let response = response.unwrap();
    assert!(response.content.contains('4'), "Response should contain '4'");

    println!("Gemini response: {}", response.content);
    println!("Tokens: {:?}", response.tokens_used);
}

/// Test OpenAI provider with real API
#[tokio::test]
#[ignore = "Requires OPENAI_API_KEY"]
async fn test_openai_real_request() {
    let api_key =
        std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for this test");

    let provider = OpenAIProvider::gpt4o_mini(&api_key);

    let response = provider.ask("Say 'hello' in one word").await;
    assert!(response.is_ok(), "Request should succeed: {:?}", response);
    assert!(!response.unwrap().is_empty());
}

/// Test error handling with invalid API key
#[tokio::test]
#[ignore = "Makes real API call"]
async fn test_invalid_api_key() {
    let provider = GeminiProvider::flash("invalid-key-12345");

    let response = provider.ask("Hello").await;
    assert!(response.is_err(), "Should fail with invalid key");
    println!("Expected error: {:?}", response.unwrap_err());
}

/// Providers built from config are usable as trait objects
#[tokio::test]
async fn test_mock_from_config_as_trait_object() {
    let provider: Arc<dyn LlmProvider> = LlmConfig::default().provider("mock").unwrap();
    assert_eq!(provider.name(), "smart-mock");

    let response = provider
        .complete(LlmRequest::simple("You are Verifier A (PRO side)."))
        .await
        .unwrap();
    assert!(response.content.starts_with("Claims:"));
}

/// Failures surface as connection errors, never as empty text
#[tokio::test]
async fn test_failing_provider_propagates() {
    let mock = MockProvider::failing("upstream reset");
    match mock.complete(LlmRequest::simple("anything")).await {
        Err(LlmError::ConnectionFailed(msg)) => assert_eq!(msg, "upstream reset"),
        other => panic!("expected connection failure, got {:?}", other),
    }
}
