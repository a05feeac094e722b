//! Metrics-based observability hooks for exchanges and tool fetches.
//!
//! ```rust
//! use robserve::MetricsObservabilityHooks;
//! use rtooling::ResolverHooks;
//!
//! fn accepts_resolver_hooks(_hooks: &dyn ResolverHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_resolver_hooks(&hooks);
//! ```

use std::time::Duration;

use rchat::{BackendRound, ExchangeContext, ExchangeError, ExchangeHooks};
use rtooling::{FetchContext, ResolverHooks, ToolOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ExchangeHooks for MetricsObservabilityHooks {
    fn on_backend_call(
        &self,
        context: &ExchangeContext,
        round: BackendRound,
        elapsed: Duration,
        error: Option<&ExchangeError>,
    ) {
        let status = match error {
            None => "success",
            Some(error) => error.kind.as_str(),
        };

        metrics::counter!(
            "repolens_backend_calls_total",
            "mode" => context.mode.as_str(),
            "round" => round.as_str(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "repolens_backend_call_duration_seconds",
            "mode" => context.mode.as_str(),
            "round" => round.as_str()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_tool_round(&self, context: &ExchangeContext, tool_calls: usize, files: usize) {
        metrics::counter!("repolens_tool_rounds_total", "mode" => context.mode.as_str())
            .increment(1);
        metrics::histogram!("repolens_tool_calls_per_round", "mode" => context.mode.as_str())
            .record(tool_calls as f64);
        metrics::histogram!("repolens_tool_files_per_round", "mode" => context.mode.as_str())
            .record(files as f64);
    }

    fn on_exchange_complete(&self, context: &ExchangeContext, backend_calls: u32, elapsed: Duration) {
        metrics::counter!(
            "repolens_exchange_total",
            "mode" => context.mode.as_str(),
            "status" => "success"
        )
        .increment(1);
        metrics::histogram!(
            "repolens_exchange_duration_seconds",
            "mode" => context.mode.as_str(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
        metrics::histogram!("repolens_backend_calls_per_exchange", "mode" => context.mode.as_str())
            .record(f64::from(backend_calls));
    }

    fn on_exchange_failure(&self, context: &ExchangeContext, error: &ExchangeError, elapsed: Duration) {
        metrics::counter!(
            "repolens_exchange_total",
            "mode" => context.mode.as_str(),
            "status" => error.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "repolens_exchange_duration_seconds",
            "mode" => context.mode.as_str(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ResolverHooks for MetricsObservabilityHooks {
    fn on_fetch_complete(&self, outcome: &ToolOutcome, _context: &FetchContext, elapsed: Duration) {
        metrics::counter!(
            "repolens_tool_fetch_total",
            "status" => outcome.status.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "repolens_tool_fetch_duration_seconds",
            "status" => outcome.status.as_str()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_paths_dropped(&self, dropped: usize, _context: &FetchContext) {
        metrics::counter!("repolens_tool_paths_dropped_total").increment(dropped as u64);
    }
}
