//! Production-friendly observability hooks for exchanges and tool fetches.
//!
//! ```rust
//! use robserve::{MetricsObservabilityHooks, SafeExchangeHooks, TracingObservabilityHooks};
//!
//! let _exchange_hooks = SafeExchangeHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeExchangeHooks, SafeResolverHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeExchangeHooks, SafeResolverHooks,
        TracingObservabilityHooks,
    };
}
