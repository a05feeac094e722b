//! Lifecycle hooks for observing exchanges.
//!
//! ```rust
//! use rchat::{ExchangeHooks, NoopExchangeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ExchangeHooks) {}
//!
//! accepts_hooks(&NoopExchangeHooks);
//! ```

use std::time::Duration;

use crate::{BackendRound, ExchangeContext, ExchangeError};

pub trait ExchangeHooks: Send + Sync {
    fn on_exchange_start(&self, _context: &ExchangeContext) {}

    fn on_backend_call(
        &self,
        _context: &ExchangeContext,
        _round: BackendRound,
        _elapsed: Duration,
        _error: Option<&ExchangeError>,
    ) {
    }

    /// Fires after the resolver ran. `files` counts the file outcomes sent
    /// back, which is zero when no call named a known tool.
    fn on_tool_round(&self, _context: &ExchangeContext, _tool_calls: usize, _files: usize) {}

    fn on_exchange_complete(
        &self,
        _context: &ExchangeContext,
        _backend_calls: u32,
        _elapsed: Duration,
    ) {
    }

    fn on_exchange_failure(
        &self,
        _context: &ExchangeContext,
        _error: &ExchangeError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExchangeHooks;

impl ExchangeHooks for NoopExchangeHooks {}
