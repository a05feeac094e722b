use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rchat::prelude::*;
use rchat::{ExchangeOutcome, fallback};
use rprovider::{
    JsonObject, Message, ModelProvider, ModelRequest, ModelResponse, Part, ProviderError,
    ProviderFuture, ProviderId, Role, StopReason, TokenUsage, ToolCall,
};
use rtooling::StaticContentFetcher;
use serde_json::json;

#[derive(Default)]
struct RecordingProvider {
    configured: bool,
    script: Mutex<VecDeque<Result<Message, ProviderError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl RecordingProvider {
    fn scripted(script: Vec<Result<Message, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Self::scripted(vec![
            Err(ProviderError::transport("connection refused")),
            Err(ProviderError::transport("connection refused")),
        ])
    }

    fn request_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

impl ModelProvider for RecordingProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push(request.clone());

            let message = self
                .script
                .lock()
                .expect("script lock")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::other("no scripted response")))?;

            Ok(ModelResponse {
                provider: ProviderId::Gemini,
                model: request.model,
                stop_reason: StopReason::EndTurn,
                message,
                usage: TokenUsage::default(),
            })
        })
    }
}

fn widget() -> RepositoryMetadata {
    RepositoryMetadata {
        name: "acme/widget".to_string(),
        description: Some("A widget".to_string()),
        stars: 10,
        ..RepositoryMetadata::default()
    }
}

fn widget_files() -> Arc<StaticContentFetcher> {
    Arc::new(
        StaticContentFetcher::new()
            .with_file("acme", "widget", "README.md", "# Widget")
            .with_file("acme", "widget", "src/index.ts", "export const widget = 1;")
            .with_file("acme", "widget", "extra.ts", "export {};")
            .with_file("acme", "widget", "ignored.ts", "never fetched"),
    )
}

fn file_request(paths: serde_json::Value) -> Message {
    let mut arguments = JsonObject::new();
    arguments.insert("filePaths".to_string(), paths);
    Message::new(
        Role::Model,
        vec![Part::ToolCall(ToolCall::new("get_file_content", arguments))],
    )
}

#[tokio::test]
async fn unreachable_backend_yields_chat_apology() {
    let provider = RecordingProvider::unreachable();
    let assistant = RepoAssistant::builder(provider, widget_files()).build();

    let response = assistant
        .answer_question(&widget(), &[], "What does it do?")
        .await;

    assert_eq!(
        response,
        Response::fallback(
            "Sorry, an error occurred: connection refused",
            "connection refused"
        )
    );
}

#[tokio::test]
async fn excess_tool_paths_are_never_fetched() {
    let provider = RecordingProvider::scripted(vec![
        Ok(file_request(json!([
            "README.md",
            "src/index.ts",
            "extra.ts",
            "ignored.ts"
        ]))),
        Ok(Message::model("Widget exports a single constant.")),
    ]);
    let fetcher = widget_files();
    let assistant = RepoAssistant::builder(provider.clone(), fetcher.clone()).build();

    let response = assistant.generate_summary(&widget()).await;
    assert_eq!(response, Response::answer("Widget exports a single constant."));

    let mut fetched = fetcher.requested_paths();
    fetched.sort();
    assert_eq!(fetched, vec!["README.md", "extra.ts", "src/index.ts"]);

    let requests = provider.requests.lock().expect("requests lock");
    let tool_message = &requests[1].messages[2];
    assert_eq!(tool_message.role, Role::Tool);
    let Part::ToolResult(result) = &tool_message.parts[0] else {
        panic!("tool message should carry a tool result");
    };
    assert_eq!(result.name, "get_file_content");
    assert_eq!(result.payload["files"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn plain_text_reply_skips_resolver() {
    let provider = RecordingProvider::scripted(vec![Ok(Message::model(
        "\nIt renders widgets.\n",
    ))]);
    let fetcher = widget_files();
    let assistant = RepoAssistant::builder(provider.clone(), fetcher.clone()).build();

    let outcome: ExchangeOutcome = assistant
        .run_chat(&widget(), &[], "What is it?", &CancellationToken::new())
        .await
        .expect("conversation should start");

    assert_eq!(outcome.answer(), Some("It renders widgets."));
    assert_eq!(outcome.backend_calls, 1);
    assert!(fetcher.requested_paths().is_empty());
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn summary_fallback_is_deterministic() {
    let first = RepoAssistant::builder(RecordingProvider::unreachable(), widget_files())
        .build()
        .generate_summary(&widget())
        .await;
    let second = RepoAssistant::builder(RecordingProvider::unreachable(), widget_files())
        .build()
        .generate_summary(&widget())
        .await;

    assert_eq!(first.text, second.text);
    assert_eq!(first.error.as_deref(), Some("connection refused"));
    assert!(first.text.contains(fallback::FALLBACK_NOTE));
    assert!(first.text.contains("A widget"));
}

#[tokio::test]
async fn missing_configuration_returns_notice_without_backend_call() {
    let provider = Arc::new(RecordingProvider::default());
    let assistant = RepoAssistant::builder(provider.clone(), widget_files()).build();

    let summary = assistant.generate_summary(&widget()).await;
    let chat = assistant.answer_question(&widget(), &[], "hi").await;

    assert_eq!(summary.text, fallback::CONFIGURATION_NOTICE);
    assert_eq!(summary.error.as_deref(), Some(fallback::CONFIGURATION_NOTICE));
    assert_eq!(chat, summary);
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn chat_history_is_trimmed_before_the_question() {
    let provider = RecordingProvider::scripted(vec![Ok(Message::model("Sure."))]);
    let assistant = RepoAssistant::builder(provider.clone(), widget_files())
        .history_pairs(1)
        .build();

    let turns = vec![
        ChatTurn::user("old question"),
        ChatTurn::assistant("old answer"),
        ChatTurn::user("recent question"),
        ChatTurn::assistant("recent answer"),
    ];
    let response = assistant
        .answer_question(&widget(), &turns, "follow up?")
        .await;
    assert_eq!(response, Response::answer("Sure."));

    let requests = provider.requests.lock().expect("requests lock");
    let sent = &requests[0].messages;
    assert_eq!(sent.len(), 5);
    assert_eq!(sent[2], Message::requester("recent question"));
    assert_eq!(sent[3], Message::model("recent answer"));
    assert_eq!(sent[4], Message::requester("follow up?"));
}

#[tokio::test]
async fn cancelled_exchange_reports_cancellation() {
    let provider = RecordingProvider::scripted(vec![Ok(Message::model("unused"))]);
    let assistant = RepoAssistant::builder(provider.clone(), widget_files()).build();

    let token = CancellationToken::new();
    token.cancel();
    let response = assistant
        .answer_question_with_cancellation(&widget(), &[], "hi", &token)
        .await;

    assert_eq!(response.text, fallback::CANCELLED_NOTICE);
    assert!(response.is_fallback());
    assert_eq!(provider.request_count(), 0);
}
