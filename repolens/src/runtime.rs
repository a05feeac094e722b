//! Runtime wiring: HTTP clients, credentials, provider, fetcher, and hooks.

use std::sync::Arc;
use std::time::Duration;

use rchat::{BackendRound, ExchangeContext, ExchangeError, ExchangeHooks, RepoAssistant};
use reqwest::Client;
use robserve::{
    MetricsObservabilityHooks, SafeExchangeHooks, SafeResolverHooks, TracingObservabilityHooks,
};
use rprovider::{ModelProvider, ProviderError};
use rtooling::{ContentFetcher, FetchContext, GithubContentFetcher, ResolverHooks, ToolOutcome};

use crate::AssistantConfig;

/// Builds an assistant over the given content fetcher. A config without an
/// API key still builds; its exchanges end with the configuration notice.
pub fn build_assistant(
    config: &AssistantConfig,
    fetcher: Arc<dyn ContentFetcher>,
) -> Result<RepoAssistant, ProviderError> {
    let provider = build_provider(config)?;
    Ok(assistant_with_provider(config, provider, fetcher))
}

/// Builds an assistant that reads repository files from the GitHub contents
/// API, sharing one HTTP client for model and file traffic.
pub fn build_github_assistant(config: &AssistantConfig) -> Result<RepoAssistant, ProviderError> {
    let http = http_client(config.request_timeout)?;
    let provider = provider_with_client(config, http.clone())?;
    let fetcher = Arc::new(GithubContentFetcher::new(http));
    Ok(assistant_with_provider(config, provider, fetcher))
}

pub fn assistant_with_provider(
    config: &AssistantConfig,
    provider: Arc<dyn ModelProvider>,
    fetcher: Arc<dyn ContentFetcher>,
) -> RepoAssistant {
    let mut builder = RepoAssistant::builder(provider, fetcher)
        .model(config.model.clone())
        .backend_timeout(config.request_timeout)
        .fetch_timeout(config.fetch_timeout)
        .max_tool_paths(config.max_tool_paths)
        .max_content_length(config.max_content_length)
        .history_pairs(config.history_pairs)
        .hooks(Arc::new(SafeExchangeHooks::new(StandardHooks)))
        .resolver_hooks(Arc::new(SafeResolverHooks::new(StandardHooks)));

    if let Some(temperature) = config.temperature {
        builder = builder.temperature(temperature);
    }

    builder.build()
}

pub fn build_provider(config: &AssistantConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let http = http_client(config.request_timeout)?;
    provider_with_client(config, http)
}

fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))
}

#[cfg(feature = "provider-gemini")]
fn provider_with_client(
    config: &AssistantConfig,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use rprovider::SecureCredentialManager;
    use rprovider::adapters::gemini::{GeminiHttpTransport, GeminiProvider};

    let credentials = Arc::new(SecureCredentialManager::new());
    if let Some(api_key) = config.api_key.as_ref().filter(|key| !key.is_empty()) {
        credentials.set_gemini_api_key(api_key.expose())?;
    } else {
        tracing::warn!("no Gemini API key configured; responses will carry the configuration notice");
    }

    let transport = Arc::new(GeminiHttpTransport::new(http).with_base_url(config.base_url.clone()));
    Ok(Arc::new(
        GeminiProvider::new(credentials, transport).with_fallback_model(config.model.clone()),
    ))
}

#[cfg(not(feature = "provider-gemini"))]
fn provider_with_client(
    _config: &AssistantConfig,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-gemini feature is not enabled on repolens",
    ))
}

/// Tracing plus metrics. Metrics are no-ops until the host installs a
/// recorder.
#[derive(Debug, Clone, Copy, Default)]
struct StandardHooks;

impl ExchangeHooks for StandardHooks {
    fn on_exchange_start(&self, context: &ExchangeContext) {
        TracingObservabilityHooks.on_exchange_start(context);
        MetricsObservabilityHooks.on_exchange_start(context);
    }

    fn on_backend_call(
        &self,
        context: &ExchangeContext,
        round: BackendRound,
        elapsed: Duration,
        error: Option<&ExchangeError>,
    ) {
        TracingObservabilityHooks.on_backend_call(context, round, elapsed, error);
        MetricsObservabilityHooks.on_backend_call(context, round, elapsed, error);
    }

    fn on_tool_round(&self, context: &ExchangeContext, tool_calls: usize, files: usize) {
        TracingObservabilityHooks.on_tool_round(context, tool_calls, files);
        MetricsObservabilityHooks.on_tool_round(context, tool_calls, files);
    }

    fn on_exchange_complete(&self, context: &ExchangeContext, backend_calls: u32, elapsed: Duration) {
        TracingObservabilityHooks.on_exchange_complete(context, backend_calls, elapsed);
        MetricsObservabilityHooks.on_exchange_complete(context, backend_calls, elapsed);
    }

    fn on_exchange_failure(&self, context: &ExchangeContext, error: &ExchangeError, elapsed: Duration) {
        TracingObservabilityHooks.on_exchange_failure(context, error, elapsed);
        MetricsObservabilityHooks.on_exchange_failure(context, error, elapsed);
    }
}

impl ResolverHooks for StandardHooks {
    fn on_fetch_start(&self, path: &str, context: &FetchContext) {
        TracingObservabilityHooks.on_fetch_start(path, context);
        MetricsObservabilityHooks.on_fetch_start(path, context);
    }

    fn on_fetch_complete(&self, outcome: &ToolOutcome, context: &FetchContext, elapsed: Duration) {
        TracingObservabilityHooks.on_fetch_complete(outcome, context, elapsed);
        MetricsObservabilityHooks.on_fetch_complete(outcome, context, elapsed);
    }

    fn on_paths_dropped(&self, dropped: usize, context: &FetchContext) {
        TracingObservabilityHooks.on_paths_dropped(dropped, context);
        MetricsObservabilityHooks.on_paths_dropped(dropped, context);
    }
}
