//! Production-friendly observability hooks for the fallback chain.
//!
//! ```rust
//! use robserve::{MetricsFallbackHooks, SafeFallbackHooks, TracingFallbackHooks};
//!
//! let _hooks = SafeFallbackHooks::new(TracingFallbackHooks);
//! let _metrics = MetricsFallbackHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsFallbackHooks;
pub use safe_hooks::SafeFallbackHooks;
pub use tracing_hooks::TracingFallbackHooks;

pub mod prelude {
    pub use crate::{MetricsFallbackHooks, SafeFallbackHooks, TracingFallbackHooks};
}
