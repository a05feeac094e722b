//! Tracing-based observability hooks for exchanges and tool fetches.
//!
//! ```rust
//! use robserve::TracingObservabilityHooks;
//! use rchat::ExchangeHooks;
//!
//! fn accepts_exchange_hooks(_hooks: &dyn ExchangeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_exchange_hooks(&hooks);
//! ```

use std::time::Duration;

use rchat::{BackendRound, ExchangeContext, ExchangeError, ExchangeHooks};
use rtooling::{FetchContext, ResolverHooks, ToolOutcome, ToolStatus};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ExchangeHooks for TracingObservabilityHooks {
    fn on_exchange_start(&self, context: &ExchangeContext) {
        tracing::info!(
            phase = "exchange",
            event = "start",
            exchange_id = %context.exchange_id,
            mode = %context.mode,
            owner = %context.fetch.owner,
            repo = %context.fetch.repo
        );
    }

    fn on_backend_call(
        &self,
        context: &ExchangeContext,
        round: BackendRound,
        elapsed: Duration,
        error: Option<&ExchangeError>,
    ) {
        match error {
            None => tracing::info!(
                phase = "backend",
                event = "success",
                exchange_id = %context.exchange_id,
                mode = %context.mode,
                round = round.as_str(),
                tools_enabled = round.tools_enabled(),
                elapsed_ms = elapsed.as_millis() as u64
            ),
            Some(error) => tracing::warn!(
                phase = "backend",
                event = "failure",
                exchange_id = %context.exchange_id,
                mode = %context.mode,
                round = round.as_str(),
                elapsed_ms = elapsed.as_millis() as u64,
                error_kind = error.kind.as_str(),
                error = %error.message
            ),
        }
    }

    fn on_tool_round(&self, context: &ExchangeContext, tool_calls: usize, files: usize) {
        tracing::info!(
            phase = "tool_round",
            event = "resolved",
            exchange_id = %context.exchange_id,
            mode = %context.mode,
            tool_calls,
            files
        );
    }

    fn on_exchange_complete(&self, context: &ExchangeContext, backend_calls: u32, elapsed: Duration) {
        tracing::info!(
            phase = "exchange",
            event = "complete",
            exchange_id = %context.exchange_id,
            mode = %context.mode,
            backend_calls,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_exchange_failure(&self, context: &ExchangeContext, error: &ExchangeError, elapsed: Duration) {
        tracing::error!(
            phase = "exchange",
            event = "failure",
            exchange_id = %context.exchange_id,
            mode = %context.mode,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.kind.as_str(),
            error = %error.message
        );
    }
}

impl ResolverHooks for TracingObservabilityHooks {
    fn on_fetch_start(&self, path: &str, context: &FetchContext) {
        tracing::debug!(
            phase = "tool_fetch",
            event = "start",
            exchange_id = context.exchange_id.as_ref().map(|id| id.as_str()),
            owner = %context.owner,
            repo = %context.repo,
            path
        );
    }

    fn on_fetch_complete(&self, outcome: &ToolOutcome, context: &FetchContext, elapsed: Duration) {
        if outcome.status == ToolStatus::Success {
            tracing::debug!(
                phase = "tool_fetch",
                event = "complete",
                exchange_id = context.exchange_id.as_ref().map(|id| id.as_str()),
                path = %outcome.path,
                status = outcome.status.as_str(),
                bytes = outcome.content.len(),
                elapsed_ms = elapsed.as_millis() as u64
            );
        } else {
            tracing::warn!(
                phase = "tool_fetch",
                event = "unavailable",
                exchange_id = context.exchange_id.as_ref().map(|id| id.as_str()),
                path = %outcome.path,
                status = outcome.status.as_str(),
                elapsed_ms = elapsed.as_millis() as u64
            );
        }
    }

    fn on_paths_dropped(&self, dropped: usize, context: &FetchContext) {
        tracing::debug!(
            phase = "tool_fetch",
            event = "paths_dropped",
            exchange_id = context.exchange_id.as_ref().map(|id| id.as_str()),
            dropped
        );
    }
}
