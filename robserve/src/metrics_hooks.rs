//! Metrics-based observability for the fallback chain.
//!
//! ```rust
//! use rfallback::FallbackHooks;
//! use robserve::MetricsFallbackHooks;
//!
//! fn accepts_hooks(_hooks: &dyn FallbackHooks) {}
//!
//! let hooks = MetricsFallbackHooks;
//! accepts_hooks(&hooks);
//! ```

use rfallback::FallbackHooks;
use rprovider::{Capability, ProviderError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsFallbackHooks;

impl FallbackHooks for MetricsFallbackHooks {
    fn on_attempt_start(&self, provider: &str, capability: Capability) {
        metrics::counter!(
            "relay_fallback_attempt_start_total",
            "provider" => provider.to_string(),
            "capability" => capability.as_str()
        )
        .increment(1);
    }

    fn on_attempt_failure(
        &self,
        provider: &str,
        capability: Capability,
        error: Option<&ProviderError>,
    ) {
        let error_kind = error
            .map(|error| format!("{:?}", error.kind))
            .unwrap_or_else(|| "EmptyResult".to_string());
        metrics::counter!(
            "relay_fallback_attempt_failure_total",
            "provider" => provider.to_string(),
            "capability" => capability.as_str(),
            "error_kind" => error_kind
        )
        .increment(1);
    }

    fn on_generation_success(&self, provider: &str, capability: Capability, rank: u32) {
        metrics::counter!(
            "relay_fallback_success_total",
            "provider" => provider.to_string(),
            "capability" => capability.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "relay_fallback_rank_per_success",
            "capability" => capability.as_str()
        )
        .record(rank as f64);
    }

    fn on_exhausted(&self, capability: Capability, attempted: u32) {
        metrics::counter!(
            "relay_fallback_exhausted_total",
            "capability" => capability.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "relay_fallback_attempts_per_exhaustion",
            "capability" => capability.as_str()
        )
        .record(attempted as f64);
    }
}
