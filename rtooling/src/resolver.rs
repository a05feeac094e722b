//! Resolves file-content tool calls into a single aggregated tool result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_timer::Delay;
use futures_util::future::{Either, join_all, select};
use rprovider::{JsonObject, ToolCall, ToolDefinition, ToolResult};
use serde_json::{Value, json};

use crate::{
    ContentFetcher, DEFAULT_MAX_CONTENT_LENGTH, FetchContext, NoopResolverHooks, ResolverHooks,
    ToolOutcome, string_list, truncate,
};

pub const FILE_CONTENT_TOOL: &str = "get_file_content";
pub const FILE_PATHS_ARGUMENT: &str = "filePaths";
pub const DEFAULT_MAX_TOOL_PATHS: usize = 3;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Paths a tool round will actually fetch, after clamping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSelection {
    pub paths: Vec<String>,
    pub dropped: usize,
}

#[derive(Clone)]
pub struct FileContentResolver {
    fetcher: Arc<dyn ContentFetcher>,
    hooks: Arc<dyn ResolverHooks>,
    max_paths: usize,
    max_content_length: usize,
    fetch_timeout: Duration,
}

impl FileContentResolver {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self {
            fetcher,
            hooks: Arc::new(NoopResolverHooks),
            max_paths: DEFAULT_MAX_TOOL_PATHS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ResolverHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    pub fn with_max_content_length(mut self, max_content_length: usize) -> Self {
        self.max_content_length = max_content_length;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn max_paths(&self) -> usize {
        self.max_paths
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: FILE_CONTENT_TOOL.to_string(),
            description: format!(
                "Fetch the content of up to {} files from the repository. Use it to read \
                 README files, manifests, or entry points before answering.",
                self.max_paths
            ),
            parameters: json!({
                "type": "object",
                "properties": {
                    FILE_PATHS_ARGUMENT: {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Repository-relative file paths, e.g. README.md or src/main.rs"
                    }
                },
                "required": [FILE_PATHS_ARGUMENT]
            }),
        }
    }

    /// Takes the first `max_paths` entries of each recognized call's path
    /// list and concatenates them in call order. Calls naming other tools
    /// contribute nothing.
    pub fn select_paths<'a>(&self, calls: impl IntoIterator<Item = &'a ToolCall>) -> PathSelection {
        let mut selection = PathSelection::default();

        for call in calls.into_iter().filter(|call| call.name == FILE_CONTENT_TOOL) {
            let mut requested = string_list(&call.arguments, FILE_PATHS_ARGUMENT);
            selection.dropped += requested.len().saturating_sub(self.max_paths);
            requested.truncate(self.max_paths);
            selection.paths.extend(requested);
        }

        selection
    }

    /// Fetches every selected path concurrently and aggregates the outcomes
    /// into one tool result named after the file-content tool. A round with
    /// no recognized call still yields a result, with an empty `files` list.
    /// Unavailable files become `error` outcomes.
    pub async fn resolve<'a>(
        &self,
        calls: impl IntoIterator<Item = &'a ToolCall>,
        context: &FetchContext,
    ) -> ToolResult {
        let files = self
            .resolve_outcomes(calls, context)
            .await
            .iter()
            .map(|outcome| {
                json!({
                    "path": outcome.path,
                    "content": outcome.content,
                    "status": outcome.status.as_str(),
                })
            })
            .collect::<Vec<_>>();

        let mut payload = JsonObject::new();
        payload.insert("files".to_string(), Value::Array(files));
        ToolResult::new(FILE_CONTENT_TOOL, payload)
    }

    pub async fn resolve_outcomes<'a>(
        &self,
        calls: impl IntoIterator<Item = &'a ToolCall>,
        context: &FetchContext,
    ) -> Vec<ToolOutcome> {
        let selection = self.select_paths(calls);
        if selection.dropped > 0 {
            self.hooks.on_paths_dropped(selection.dropped, context);
        }

        join_all(
            selection
                .paths
                .into_iter()
                .map(|path| self.resolve_path(path, context)),
        )
        .await
    }

    async fn resolve_path(&self, path: String, context: &FetchContext) -> ToolOutcome {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            let outcome = ToolOutcome::not_found(path);
            self.hooks
                .on_fetch_complete(&outcome, context, Duration::ZERO);
            return outcome;
        }

        self.hooks.on_fetch_start(trimmed, context);
        let started = Instant::now();

        let fetch = self.fetcher.fetch(&context.owner, &context.repo, trimmed);
        let outcome = match select(fetch, Delay::new(self.fetch_timeout)).await {
            Either::Left((Some(content), _)) => {
                ToolOutcome::success(trimmed, truncate(&content, self.max_content_length))
            }
            Either::Left((None, _)) | Either::Right(((), _)) => ToolOutcome::error(trimmed),
        };

        self.hooks
            .on_fetch_complete(&outcome, context, started.elapsed());
        outcome
    }
}

impl std::fmt::Debug for FileContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileContentResolver")
            .field("max_paths", &self.max_paths)
            .field("max_content_length", &self.max_content_length)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rcommon::BoxFuture;

    use super::*;
    use crate::{StaticContentFetcher, TRUNCATION_MARKER, ToolStatus};

    fn call(name: &str, paths: Value) -> ToolCall {
        let mut arguments = JsonObject::new();
        arguments.insert(FILE_PATHS_ARGUMENT.to_string(), paths);
        ToolCall::new(name, arguments)
    }

    fn context() -> FetchContext {
        FetchContext::new("acme", "widget")
    }

    fn fixture_fetcher() -> Arc<StaticContentFetcher> {
        Arc::new(
            StaticContentFetcher::new()
                .with_file("acme", "widget", "README.md", "# Widget")
                .with_file("acme", "widget", "src/index.ts", "export {}")
                .with_file("acme", "widget", "extra.ts", "const x = 1;")
                .with_file("acme", "widget", "ignored.ts", "never read"),
        )
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ResolverHooks for RecordingHooks {
        fn on_fetch_start(&self, path: &str, _context: &FetchContext) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{path}"));
        }

        fn on_fetch_complete(
            &self,
            outcome: &ToolOutcome,
            _context: &FetchContext,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("done:{}:{}", outcome.path, outcome.status.as_str()));
        }

        fn on_paths_dropped(&self, dropped: usize, _context: &FetchContext) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("dropped:{dropped}"));
        }
    }

    #[tokio::test]
    async fn clamps_requested_paths_to_the_limit() {
        let fetcher = fixture_fetcher();
        let resolver = FileContentResolver::new(fetcher.clone());

        let calls = [call(
            FILE_CONTENT_TOOL,
            json!(["README.md", "src/index.ts", "extra.ts", "ignored.ts"]),
        )];
        let outcomes = resolver.resolve_outcomes(&calls, &context()).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|outcome| outcome.status == ToolStatus::Success));

        let mut requested = fetcher.requested_paths();
        requested.sort();
        assert_eq!(requested, vec!["README.md", "extra.ts", "src/index.ts"]);
    }

    #[tokio::test]
    async fn multiple_calls_collapse_into_one_result() {
        let resolver = FileContentResolver::new(fixture_fetcher());

        let calls = [
            call(FILE_CONTENT_TOOL, json!(["README.md"])),
            call("search_code", json!(["extra.ts"])),
            call(FILE_CONTENT_TOOL, json!(["src/index.ts"])),
        ];
        let result = resolver.resolve(&calls, &context()).await;

        assert_eq!(result.name, FILE_CONTENT_TOOL);
        let files = result.payload["files"].as_array().expect("files array");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["path"], "README.md");
        assert_eq!(files[0]["content"], "# Widget");
        assert_eq!(files[0]["status"], "success");
        assert_eq!(files[1]["path"], "src/index.ts");
    }

    #[tokio::test]
    async fn limit_applies_to_each_call_separately() {
        let fetcher = fixture_fetcher();
        let resolver = FileContentResolver::new(fetcher.clone());

        let calls = [
            call(FILE_CONTENT_TOOL, json!(["README.md", "src/index.ts"])),
            call(FILE_CONTENT_TOOL, json!(["extra.ts", "ignored.ts"])),
        ];
        let outcomes = resolver.resolve_outcomes(&calls, &context()).await;

        assert_eq!(outcomes.len(), 4);
        let mut requested = fetcher.requested_paths();
        requested.sort();
        assert_eq!(
            requested,
            vec!["README.md", "extra.ts", "ignored.ts", "src/index.ts"]
        );
    }

    #[test]
    fn select_paths_counts_only_per_call_excess() {
        let resolver = FileContentResolver::new(fixture_fetcher()).with_max_paths(2);

        let calls = [
            call(FILE_CONTENT_TOOL, json!(["a.rs", "b.rs", "c.rs"])),
            call("search_code", json!(["x.rs", "y.rs", "z.rs"])),
            call(FILE_CONTENT_TOOL, json!(["d.rs"])),
        ];
        let selection = resolver.select_paths(&calls);

        assert_eq!(selection.paths, vec!["a.rs", "b.rs", "d.rs"]);
        assert_eq!(selection.dropped, 1);
    }

    #[tokio::test]
    async fn missing_files_become_error_outcomes_with_placeholder() {
        let resolver = FileContentResolver::new(fixture_fetcher());

        let calls = [call(FILE_CONTENT_TOOL, json!(["nope.rs"]))];
        let outcomes = resolver.resolve_outcomes(&calls, &context()).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, ToolStatus::Error);
        assert!(outcomes[0].content.contains("nope.rs"));
        assert!(outcomes[0].content.starts_with("//"));
    }

    #[tokio::test]
    async fn blank_paths_are_not_fetched() {
        let fetcher = fixture_fetcher();
        let resolver = FileContentResolver::new(fetcher.clone());

        let calls = [call(FILE_CONTENT_TOOL, json!(["  ", "README.md"]))];
        let outcomes = resolver.resolve_outcomes(&calls, &context()).await;

        assert_eq!(outcomes[0].status, ToolStatus::NotFound);
        assert_eq!(outcomes[1].status, ToolStatus::Success);
        assert_eq!(fetcher.requested_paths(), vec!["README.md"]);
    }

    #[tokio::test]
    async fn large_content_is_truncated() {
        let fetcher = Arc::new(StaticContentFetcher::new().with_file(
            "acme",
            "widget",
            "big.txt",
            "line\n".repeat(1_000),
        ));
        let resolver = FileContentResolver::new(fetcher).with_max_content_length(200);

        let calls = [call(FILE_CONTENT_TOOL, json!(["big.txt"]))];
        let outcomes = resolver.resolve_outcomes(&calls, &context()).await;

        assert!(outcomes[0].content.len() <= 200);
        assert!(outcomes[0].content.ends_with(TRUNCATION_MARKER));
    }

    struct SlowFetcher;

    impl ContentFetcher for SlowFetcher {
        fn fetch<'a>(
            &'a self,
            _owner: &'a str,
            _repo: &'a str,
            _path: &'a str,
        ) -> BoxFuture<'a, Option<String>> {
            Box::pin(async {
                Delay::new(Duration::from_secs(5)).await;
                Some("too late".to_string())
            })
        }
    }

    #[tokio::test]
    async fn fetch_deadline_expiry_becomes_error_outcome() {
        let resolver = FileContentResolver::new(Arc::new(SlowFetcher))
            .with_fetch_timeout(Duration::from_millis(20));

        let calls = [call(FILE_CONTENT_TOOL, json!(["README.md"]))];
        let outcomes = resolver.resolve_outcomes(&calls, &context()).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, ToolStatus::Error);
    }

    #[tokio::test]
    async fn hooks_observe_fetch_lifecycle_and_dropped_paths() {
        let hooks = Arc::new(RecordingHooks::default());
        let resolver = FileContentResolver::new(fixture_fetcher())
            .with_max_paths(1)
            .with_hooks(hooks.clone());

        let calls = [call(FILE_CONTENT_TOOL, json!(["README.md", "extra.ts"]))];
        let _ = resolver.resolve(&calls, &context()).await;

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec!["dropped:1", "start:README.md", "done:README.md:success"]
        );
    }

    #[tokio::test]
    async fn unrecognized_calls_resolve_to_empty_file_list() {
        let fetcher = fixture_fetcher();
        let resolver = FileContentResolver::new(fetcher.clone());

        let calls = [call("search_code", json!(["README.md"]))];
        let result = resolver.resolve(&calls, &context()).await;

        assert_eq!(result.name, FILE_CONTENT_TOOL);
        assert_eq!(result.payload["files"], json!([]));
        assert!(fetcher.requested_paths().is_empty());
    }

    #[test]
    fn definition_describes_file_paths_argument() {
        let resolver = FileContentResolver::new(fixture_fetcher());
        let definition = resolver.definition();

        assert_eq!(definition.name, FILE_CONTENT_TOOL);
        assert_eq!(
            definition.parameters["properties"][FILE_PATHS_ARGUMENT]["type"],
            "array"
        );
        assert!(definition.description.contains('3'));
    }
}
