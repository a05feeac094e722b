//! File-content tooling: the tool the model calls to read repository files,
//! the fetchers that back it, and the truncation applied to what comes back.

mod args;
mod fetcher;
mod github;
mod hooks;
mod resolver;
mod truncate;
mod types;

pub mod prelude {
    pub use crate::{
        ContentFetcher, FetchContext, FileContentResolver, GithubContentFetcher, ResolverHooks,
        StaticContentFetcher, ToolOutcome, ToolStatus,
    };
}

pub use args::string_list;
pub use fetcher::{ContentFetcher, StaticContentFetcher};
pub use github::{DEFAULT_MAX_FILE_BYTES, GITHUB_API_BASE_URL, GithubContentFetcher};
pub use hooks::{NoopResolverHooks, ResolverHooks};
pub use resolver::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_TOOL_PATHS, FILE_CONTENT_TOOL, FILE_PATHS_ARGUMENT,
    FileContentResolver, PathSelection,
};
pub use truncate::{DEFAULT_MAX_CONTENT_LENGTH, TRUNCATION_MARKER, truncate};
pub use types::{FetchContext, ToolOutcome, ToolStatus};
