//! Hooks for observing per-path fetches inside a tool round.
//!
//! ```rust
//! use rtooling::{NoopResolverHooks, ResolverHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ResolverHooks) {}
//!
//! let hooks = NoopResolverHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use crate::{FetchContext, ToolOutcome};

pub trait ResolverHooks: Send + Sync {
    fn on_fetch_start(&self, _path: &str, _context: &FetchContext) {}

    fn on_fetch_complete(&self, _outcome: &ToolOutcome, _context: &FetchContext, _elapsed: Duration) {
    }

    fn on_paths_dropped(&self, _dropped: usize, _context: &FetchContext) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolverHooks;

impl ResolverHooks for NoopResolverHooks {}
