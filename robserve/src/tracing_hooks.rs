//! Tracing-based observability for the fallback chain.
//!
//! ```rust
//! use rfallback::FallbackHooks;
//! use robserve::TracingFallbackHooks;
//!
//! fn accepts_hooks(_hooks: &dyn FallbackHooks) {}
//!
//! let hooks = TracingFallbackHooks;
//! accepts_hooks(&hooks);
//! ```

use rfallback::FallbackHooks;
use rprovider::{Capability, ProviderError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFallbackHooks;

impl FallbackHooks for TracingFallbackHooks {
    fn on_attempt_start(&self, provider: &str, capability: Capability) {
        tracing::info!(
            phase = "fallback",
            event = "attempt_start",
            provider,
            capability = %capability
        );
    }

    fn on_attempt_failure(
        &self,
        provider: &str,
        capability: Capability,
        error: Option<&ProviderError>,
    ) {
        match error {
            Some(error) => tracing::warn!(
                phase = "fallback",
                event = "attempt_failure",
                provider,
                capability = %capability,
                error_kind = ?error.kind,
                error = %error
            ),
            None => tracing::warn!(
                phase = "fallback",
                event = "attempt_failure",
                provider,
                capability = %capability,
                error_kind = "EmptyResult"
            ),
        }
    }

    fn on_generation_success(&self, provider: &str, capability: Capability, rank: u32) {
        tracing::info!(
            phase = "fallback",
            event = "generation_success",
            provider,
            capability = %capability,
            rank
        );
    }

    fn on_exhausted(&self, capability: Capability, attempted: u32) {
        tracing::error!(
            phase = "fallback",
            event = "exhausted",
            capability = %capability,
            attempted
        );
    }
}
