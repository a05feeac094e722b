use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use rchat::{BackendRound, ExchangeContext, ExchangeError, ExchangeHooks};
use rtooling::{FetchContext, ResolverHooks, ToolOutcome};

pub struct SafeExchangeHooks<H> {
    inner: H,
}

impl<H> SafeExchangeHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ExchangeHooks for SafeExchangeHooks<H>
where
    H: ExchangeHooks,
{
    fn on_exchange_start(&self, context: &ExchangeContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_exchange_start(context)));
    }

    fn on_backend_call(
        &self,
        context: &ExchangeContext,
        round: BackendRound,
        elapsed: Duration,
        error: Option<&ExchangeError>,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_backend_call(context, round, elapsed, error)
        }));
    }

    fn on_tool_round(&self, context: &ExchangeContext, tool_calls: usize, files: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_tool_round(context, tool_calls, files)
        }));
    }

    fn on_exchange_complete(&self, context: &ExchangeContext, backend_calls: u32, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_exchange_complete(context, backend_calls, elapsed)
        }));
    }

    fn on_exchange_failure(&self, context: &ExchangeContext, error: &ExchangeError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exchange_failure(context, error, elapsed)
        }));
    }
}

pub struct SafeResolverHooks<H> {
    inner: H,
}

impl<H> SafeResolverHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ResolverHooks for SafeResolverHooks<H>
where
    H: ResolverHooks,
{
    fn on_fetch_start(&self, path: &str, context: &FetchContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_fetch_start(path, context)));
    }

    fn on_fetch_complete(&self, outcome: &ToolOutcome, context: &FetchContext, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_fetch_complete(outcome, context, elapsed)
        }));
    }

    fn on_paths_dropped(&self, dropped: usize, context: &FetchContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_paths_dropped(dropped, context)
        }));
    }
}
