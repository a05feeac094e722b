//! Tool-augmented conversation orchestration for repository questions.
//!
//! [`RepoAssistant`] turns repository metadata into a summary or a chat
//! answer. Each call runs one exchange through the [`ConversationDriver`],
//! which allows the model a single round of file-content tool calls before
//! it must answer. Failures never escape as errors: the [`fallback`] policy
//! always yields a populated [`Response`].

mod context;
mod conversation;
mod driver;
mod error;
pub mod fallback;
mod hooks;
mod metadata;
pub mod prompt;
mod response;
mod service;

pub mod prelude {
    pub use crate::{
        ChatTurn, ExchangeError, ExchangeErrorKind, ExchangeHooks, RepoAssistant,
        RepoAssistantBuilder, RepositoryMetadata, Response, TurnRole,
    };
    pub use tokio_util::sync::CancellationToken;
}

pub use context::{BackendRound, ExchangeContext, ExchangeMode};
pub use conversation::Conversation;
pub use driver::{ConversationDriver, DEFAULT_BACKEND_TIMEOUT, DriverState, ExchangeOutcome};
pub use error::{ExchangeError, ExchangeErrorKind};
pub use hooks::{ExchangeHooks, NoopExchangeHooks};
pub use metadata::{ChatTurn, ContentEntry, EntryKind, RepositoryMetadata, TurnRole};
pub use prompt::{PromptBuilder, build_chat_prompt, build_summary_prompt};
pub use response::Response;
pub use service::{RepoAssistant, RepoAssistantBuilder};
pub use tokio_util::sync::CancellationToken;
