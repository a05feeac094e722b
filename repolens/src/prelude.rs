//! Common imports for most repolens applications.

pub use crate::rl_turns;
pub use crate::{
    AssistantConfig, CancellationToken, ChatTurn, ContentFetcher, ExchangeError,
    ExchangeErrorKind, GithubContentFetcher, RepoAssistant, RepoAssistantBuilder,
    RepositoryMetadata, Response, StaticContentFetcher, TurnRole, build_assistant,
    build_github_assistant, parse_repository,
};
