//! Caller-facing assistant: one summary exchange or one chat turn per call.

use std::sync::Arc;
use std::time::Duration;

use rcommon::GenerationOptions;
use rprovider::ModelProvider;
use rtooling::{
    ContentFetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_MAX_TOOL_PATHS,
    FileContentResolver, NoopResolverHooks, ResolverHooks,
};
use tokio_util::sync::CancellationToken;

use crate::driver::DEFAULT_BACKEND_TIMEOUT;
use crate::prompt::DEFAULT_HISTORY_PAIRS;
use crate::{
    ChatTurn, Conversation, ConversationDriver, ExchangeContext, ExchangeError, ExchangeHooks,
    ExchangeMode, ExchangeOutcome, NoopExchangeHooks, PromptBuilder, RepositoryMetadata, Response,
    fallback,
};

#[derive(Clone, Debug)]
pub struct RepoAssistant {
    driver: ConversationDriver,
    prompts: PromptBuilder,
}

impl RepoAssistant {
    pub fn new(driver: ConversationDriver, prompts: PromptBuilder) -> Self {
        Self { driver, prompts }
    }

    pub fn builder(
        provider: Arc<dyn ModelProvider>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> RepoAssistantBuilder {
        RepoAssistantBuilder::new(provider, fetcher)
    }

    pub fn driver(&self) -> &ConversationDriver {
        &self.driver
    }

    pub async fn generate_summary(&self, metadata: &RepositoryMetadata) -> Response {
        self.generate_summary_with_cancellation(metadata, &CancellationToken::new())
            .await
    }

    pub async fn generate_summary_with_cancellation(
        &self,
        metadata: &RepositoryMetadata,
        cancel: &CancellationToken,
    ) -> Response {
        let result = self
            .run_summary(metadata, cancel)
            .await
            .and_then(|outcome| outcome.result);

        match result {
            Ok(text) => Response::answer(text),
            Err(error) => fallback::summary_response(metadata, &error),
        }
    }

    pub async fn answer_question(
        &self,
        metadata: &RepositoryMetadata,
        prior_turns: &[ChatTurn],
        question: &str,
    ) -> Response {
        self.answer_question_with_cancellation(
            metadata,
            prior_turns,
            question,
            &CancellationToken::new(),
        )
        .await
    }

    pub async fn answer_question_with_cancellation(
        &self,
        metadata: &RepositoryMetadata,
        prior_turns: &[ChatTurn],
        question: &str,
        cancel: &CancellationToken,
    ) -> Response {
        let result = self
            .run_chat(metadata, prior_turns, question, cancel)
            .await
            .and_then(|outcome| outcome.result);

        match result {
            Ok(text) => Response::answer(text),
            Err(error) => fallback::chat_response(&error),
        }
    }

    /// Runs a summary exchange and returns the full outcome, transcript
    /// included, without applying the fallback policy.
    pub async fn run_summary(
        &self,
        metadata: &RepositoryMetadata,
        cancel: &CancellationToken,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let conversation = Conversation::new(vec![self.prompts.summary_prompt(metadata)])?;
        let context = ExchangeContext::new(ExchangeMode::Summary, metadata);
        Ok(self.driver.run(conversation, &context, cancel).await)
    }

    pub async fn run_chat(
        &self,
        metadata: &RepositoryMetadata,
        prior_turns: &[ChatTurn],
        question: &str,
        cancel: &CancellationToken,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let conversation =
            Conversation::new(self.prompts.chat_prompt(metadata, prior_turns, question))?;
        let context = ExchangeContext::new(ExchangeMode::Chat, metadata);
        Ok(self.driver.run(conversation, &context, cancel).await)
    }
}

pub struct RepoAssistantBuilder {
    provider: Arc<dyn ModelProvider>,
    fetcher: Arc<dyn ContentFetcher>,
    model: String,
    options: GenerationOptions,
    backend_timeout: Duration,
    fetch_timeout: Duration,
    max_tool_paths: usize,
    max_content_length: usize,
    history_pairs: usize,
    hooks: Arc<dyn ExchangeHooks>,
    resolver_hooks: Arc<dyn ResolverHooks>,
}

impl RepoAssistantBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self {
            provider,
            fetcher,
            model: "gemini-2.0-flash".to_string(),
            options: GenerationOptions::default(),
            backend_timeout: DEFAULT_BACKEND_TIMEOUT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_tool_paths: DEFAULT_MAX_TOOL_PATHS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            history_pairs: DEFAULT_HISTORY_PAIRS,
            hooks: Arc::new(NoopExchangeHooks),
            resolver_hooks: Arc::new(NoopResolverHooks),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = self.options.with_temperature(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.options = self.options.with_max_tokens(max_tokens);
        self
    }

    pub fn backend_timeout(mut self, backend_timeout: Duration) -> Self {
        self.backend_timeout = backend_timeout;
        self
    }

    pub fn fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn max_tool_paths(mut self, max_tool_paths: usize) -> Self {
        self.max_tool_paths = max_tool_paths;
        self
    }

    pub fn max_content_length(mut self, max_content_length: usize) -> Self {
        self.max_content_length = max_content_length;
        self
    }

    pub fn history_pairs(mut self, history_pairs: usize) -> Self {
        self.history_pairs = history_pairs;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ExchangeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn resolver_hooks(mut self, resolver_hooks: Arc<dyn ResolverHooks>) -> Self {
        self.resolver_hooks = resolver_hooks;
        self
    }

    pub fn build(self) -> RepoAssistant {
        let resolver = FileContentResolver::new(self.fetcher)
            .with_hooks(self.resolver_hooks)
            .with_max_paths(self.max_tool_paths)
            .with_max_content_length(self.max_content_length)
            .with_fetch_timeout(self.fetch_timeout);

        let driver = ConversationDriver::new(self.provider, resolver, self.model)
            .with_hooks(self.hooks)
            .with_options(self.options)
            .with_backend_timeout(self.backend_timeout);

        let prompts = PromptBuilder::new()
            .with_max_tool_paths(self.max_tool_paths)
            .with_history_pairs(self.history_pairs);

        RepoAssistant::new(driver, prompts)
    }
}
