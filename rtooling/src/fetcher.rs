//! Data-source contract for repository file content.
//!
//! ```rust
//! use rtooling::{ContentFetcher, StaticContentFetcher};
//!
//! let fetcher = StaticContentFetcher::new().with_file("acme", "widget", "README.md", "# Widget");
//! # tokio_test_block_on(async {
//! let found = fetcher.fetch("acme", "widget", "README.md").await;
//! assert_eq!(found.as_deref(), Some("# Widget"));
//! assert!(fetcher.fetch("acme", "widget", "missing.rs").await.is_none());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(future: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(future)
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use rcommon::BoxFuture;

/// Source of repository file content.
///
/// Implementations apply their own size ceiling and return `None` for any
/// not-found, oversized, or failed lookup; callers cannot tell those apart.
pub trait ContentFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> BoxFuture<'a, Option<String>>;
}

/// In-memory fetcher keyed by `owner/repo/path`. Records every lookup.
#[derive(Debug, Default)]
pub struct StaticContentFetcher {
    files: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(
        mut self,
        owner: &str,
        repo: &str,
        path: &str,
        content: impl Into<String>,
    ) -> Self {
        self.files.insert(file_key(owner, repo, path), content.into());
        self
    }

    /// Paths requested so far, in request order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl ContentFetcher for StaticContentFetcher {
    fn fetch<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        path: &'a str,
    ) -> BoxFuture<'a, Option<String>> {
        Box::pin(async move {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(path.to_string());
            }

            self.files.get(&file_key(owner, repo, path)).cloned()
        })
    }
}

fn file_key(owner: &str, repo: &str, path: &str) -> String {
    format!("{owner}/{repo}/{}", path.trim_start_matches('/'))
}
