//! Unified facade over the repolens workspace crates.
//!
//! Most applications only need [`AssistantConfig::from_env`] and
//! [`build_github_assistant`] (or [`build_assistant`] with their own
//! [`ContentFetcher`]), then call [`RepoAssistant::generate_summary`] or
//! [`RepoAssistant::answer_question`].
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use repolens::{AssistantConfig, RepositoryMetadata, StaticContentFetcher, build_assistant};
//!
//! let config = AssistantConfig::new();
//! let assistant = build_assistant(&config, Arc::new(StaticContentFetcher::new()))
//!     .expect("assistant should build");
//!
//! let metadata = RepositoryMetadata::new("acme", "widget");
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()
//!     .expect("runtime");
//! let response = runtime.block_on(assistant.generate_summary(&metadata));
//!
//! // No API key configured: the notice comes back without any network call.
//! assert!(response.is_fallback());
//! assert_eq!(response.text, repolens::fallback::CONFIGURATION_NOTICE);
//! ```

mod config;
mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use rchat;
pub use rcommon;
pub use robserve;
pub use rprovider;
pub use rtooling;

pub use config::{
    API_KEY_VAR, AssistantConfig, BASE_URL_VAR, ConfigError, ConfigErrorKind, DEFAULT_BASE_URL,
    DEFAULT_MODEL, MODEL_VAR, REQUEST_TIMEOUT_VAR,
};
pub use rchat::{
    BackendRound, CancellationToken, ChatTurn, ContentEntry, Conversation, ConversationDriver,
    DriverState, EntryKind, ExchangeContext, ExchangeError, ExchangeErrorKind, ExchangeHooks,
    ExchangeMode, ExchangeOutcome, NoopExchangeHooks, PromptBuilder, RepoAssistant,
    RepoAssistantBuilder, RepositoryMetadata, Response, TurnRole, build_chat_prompt,
    build_summary_prompt, fallback,
};
pub use rcommon::{BoxFuture, ExchangeId, GenerationOptions};
pub use robserve::{
    MetricsObservabilityHooks, SafeExchangeHooks, SafeResolverHooks, TracingObservabilityHooks,
};
pub use rprovider::{
    JsonObject, Message, ModelProvider, ModelRequest, ModelResponse, Part, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, Role, SecretString, SecureCredentialManager,
    StopReason, TokenUsage, ToolCall, ToolDefinition, ToolResult,
};
pub use rtooling::{
    ContentFetcher, FetchContext, FileContentResolver, GithubContentFetcher, ResolverHooks,
    StaticContentFetcher, ToolOutcome, ToolStatus, truncate,
};

pub use runtime::{
    assistant_with_provider, build_assistant, build_github_assistant, build_provider,
};
pub use util::{bare_metadata, parse_repository};

#[cfg(test)]
mod tests {
    use crate::TurnRole;

    #[test]
    fn rl_turns_macro_builds_history() {
        let turns = crate::rl_turns![
            user => "hi",
            assistant => "hello",
            user => "what is this?",
        ];

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[1].content, "hello");
    }

    #[test]
    fn rl_turns_macro_supports_empty_history() {
        let turns = crate::rl_turns![];
        assert!(turns.is_empty());
    }
}
