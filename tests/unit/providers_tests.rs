/*!
 * Tests for provider implementations against a local HTTP server
 */

use resxlate::errors::ProviderError;
use resxlate::providers::anthropic::Anthropic;
use resxlate::providers::google::GoogleTranslate;
use resxlate::providers::openai::OpenAI;
use resxlate::providers::{Provider, TranslationRequest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(text: &str, target: &str) -> TranslationRequest {
    TranslationRequest::new(text, "auto", target)
}

#[tokio::test]
async fn test_google_translate_withSuccess_shouldReturnTranslation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "gtx"))
        .and(query_param("sl", "auto"))
        .and(query_param("tl", "es"))
        .and(query_param("dt", "t"))
        .and(query_param("q", "Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[[["Hola","Hello",null,null,10]],null,"en"]"#))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GoogleTranslate::new(server.uri());
    let response = provider.translate(request("Hello", "es")).await.unwrap();

    assert_eq!(response.text, "Hola");
    assert_eq!(response.detected_source_language.as_deref(), Some("en"));
}

#[tokio::test]
async fn test_google_translate_withBadLanguage_shouldReturnPermanentError() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid tl"))
        .mount(&server)
        .await;

    let provider = GoogleTranslate::new(server.uri());
    let error = provider.translate(request("Hello", "zz")).await.unwrap_err();

    assert!(matches!(error, ProviderError::ApiError { status_code: 400, .. }));
    assert!(!error.is_transient());
}

#[tokio::test]
async fn test_google_translate_withThrottling_shouldCarryRetryAfter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    let provider = GoogleTranslate::new(server.uri());
    let error = provider.translate(request("Hello", "es")).await.unwrap_err();

    assert!(matches!(error, ProviderError::RateLimitExceeded { retry_after_secs: Some(12), .. }));
    assert!(error.is_transient());
}

#[tokio::test]
async fn test_google_translate_withServerError_shouldBeTransient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = GoogleTranslate::new(server.uri());
    let error = provider.translate(request("Hello", "es")).await.unwrap_err();

    assert!(error.is_transient());
}

#[tokio::test]
async fn test_google_translate_withUnreachableHost_shouldBeConnectionError() {
    // Port 9 (discard) is closed on test machines
    let provider = GoogleTranslate::new("http://127.0.0.1:9");
    let error = provider.translate(request("Hello", "es")).await.unwrap_err();

    assert!(error.is_transient());
}

#[tokio::test]
async fn test_openai_withSuccess_shouldSendPromptAndTrimAnswer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "messages": [
                { "role": "system", "content": "Translate to French." },
                { "role": "user", "content": "Save" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": " Enregistrer\n" } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAI::new("test-key", server.uri(), "gpt-test", "Translate to {target_language}.", 0.0);
    let response = provider.translate(request("Save", "fr")).await.unwrap();

    assert_eq!(response.text, "Enregistrer");
}

#[tokio::test]
async fn test_openai_withBadKey_shouldReturnAuthenticationError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let provider = OpenAI::new("wrong", server.uri(), "gpt-test", "prompt", 0.0);
    let error = provider.translate(request("Save", "fr")).await.unwrap_err();

    assert!(matches!(error, ProviderError::AuthenticationError(_)));
}

#[tokio::test]
async fn test_anthropic_withSuccess_shouldReturnText() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({ "system": "From the source language to German." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [ { "type": "text", "text": "Speichern" } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Anthropic::new(
        "test-key",
        server.uri(),
        "claude-test",
        "From {source_language} to {target_language}.",
        0.2,
    );
    let response = provider.translate(request("Save", "de")).await.unwrap();

    assert_eq!(response.text, "Speichern");
}

#[tokio::test]
async fn test_anthropic_withInvalidBody_shouldReturnParseError() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = Anthropic::new("key", server.uri(), "claude-test", "prompt", 0.2);
    let error = provider.translate(request("Save", "de")).await.unwrap_err();

    assert!(matches!(error, ProviderError::ParseError(_)));
}
