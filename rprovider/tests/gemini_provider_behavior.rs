#![cfg(feature = "provider-gemini")]

use std::sync::{Arc, Mutex};

use rprovider::adapters::gemini::{
    GeminiAuth, GeminiCallingMode, GeminiFinishReason, GeminiPart, GeminiProvider, GeminiRequest,
    GeminiResponse, GeminiTransport, GeminiUsage,
};
use rprovider::{
    JsonObject, Message, ModelProvider, ModelRequest, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, SecureCredentialManager, StopReason, ToolDefinition,
};
use serde_json::json;

#[derive(Debug, Default)]
struct FakeTransport {
    captured_key: Mutex<Option<String>>,
    captured_request: Mutex<Option<GeminiRequest>>,
}

impl GeminiTransport for FakeTransport {
    fn generate<'a>(
        &'a self,
        request: GeminiRequest,
        auth: GeminiAuth,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>> {
        Box::pin(async move {
            *self.captured_request.lock().expect("request lock") = Some(request);
            *self.captured_key.lock().expect("key lock") = Some(match auth {
                GeminiAuth::ApiKey(value) => value.expose().to_string(),
            });

            let mut args = JsonObject::new();
            args.insert("filePaths".to_string(), json!(["README.md"]));

            Ok(GeminiResponse {
                model: "gemini-2.0-flash".to_string(),
                parts: vec![
                    GeminiPart::Text("checking".to_string()),
                    GeminiPart::FunctionCall {
                        name: "get_file_content".to_string(),
                        args,
                    },
                ],
                finish_reason: GeminiFinishReason::Stop,
                usage: GeminiUsage {
                    prompt_token_count: 7,
                    candidates_token_count: 3,
                    total_token_count: 10,
                },
            })
        })
    }
}

fn file_tool() -> ToolDefinition {
    ToolDefinition {
        name: "get_file_content".to_string(),
        description: "Reads repository files".to_string(),
        parameters: json!({"type": "object"}),
    }
}

#[tokio::test]
async fn complete_maps_gemini_response_to_provider_response() {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_gemini_api_key("AIza-test-key")
        .expect("key should set");

    let transport = Arc::new(FakeTransport::default());
    let provider = GeminiProvider::new(credentials, transport.clone());
    assert!(provider.is_configured());

    let request = ModelRequest::new("gemini-2.0-flash", vec![Message::requester("hi")])
        .with_tools(vec![file_tool()])
        .with_tools_enabled(true);

    let response = provider
        .complete(request)
        .await
        .expect("completion should succeed");
    assert_eq!(response.provider, ProviderId::Gemini);
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.usage.total_tokens, 10);
    assert_eq!(response.message.parts.len(), 2);
    assert!(response.has_usable_content());

    let key = transport
        .captured_key
        .lock()
        .expect("key lock")
        .clone()
        .expect("key should be captured");
    assert_eq!(key, "AIza-test-key");

    let captured = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(captured.model, "gemini-2.0-flash");
    assert_eq!(captured.calling_mode, GeminiCallingMode::Auto);
    assert_eq!(captured.functions.len(), 1);
}

#[tokio::test]
async fn missing_gemini_credentials_returns_auth_error() {
    let credentials = Arc::new(SecureCredentialManager::new());
    let transport = Arc::new(FakeTransport::default());
    let provider = GeminiProvider::new(credentials, transport.clone());
    assert!(!provider.is_configured());

    let request = ModelRequest::new("gemini-2.0-flash", vec![Message::requester("hi")]);
    let error = provider
        .complete(request)
        .await
        .expect_err("missing key should fail");

    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert_eq!(error.message, "no Gemini API key configured");
    assert!(transport.captured_request.lock().expect("request lock").is_none());
}

#[tokio::test]
async fn invalid_request_is_rejected_before_transport() {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_gemini_api_key("AIza-test-key")
        .expect("key should set");
    let transport = Arc::new(FakeTransport::default());
    let provider = GeminiProvider::new(credentials, transport.clone());

    let request = ModelRequest::new("gemini-2.0-flash", Vec::new());
    let error = provider
        .complete(request)
        .await
        .expect_err("empty conversation should fail");

    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    assert!(transport.captured_request.lock().expect("request lock").is_none());
}

#[test]
fn gemini_api_key_with_whitespace_is_rejected() {
    let credentials = SecureCredentialManager::new();
    let error = credentials
        .set_gemini_api_key("AIza key")
        .expect_err("whitespace should fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
}
