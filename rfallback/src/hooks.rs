//! Observation points inside the fallback loop.
//!
//! The orchestrator itself emits nothing; callers that want logs or metrics
//! implement [`FallbackHooks`] and hand it in at construction. Every method
//! has an empty default body so implementors override only what they need.

use rprovider::{Capability, ProviderError};

pub trait FallbackHooks: Send + Sync {
    /// A provider is about to be tried.
    fn on_attempt_start(&self, _provider: &str, _capability: Capability) {}

    /// A provider yielded nothing usable. `error` is `None` when the attempt
    /// completed but returned an empty result.
    fn on_attempt_failure(
        &self,
        _provider: &str,
        _capability: Capability,
        _error: Option<&ProviderError>,
    ) {
    }

    /// A provider produced a payload. `rank` is its zero-based position in
    /// the chain, so a non-zero rank means earlier providers were skipped
    /// over after failing.
    fn on_generation_success(&self, _provider: &str, _capability: Capability, _rank: u32) {}

    /// Every provider in the chain failed.
    fn on_exhausted(&self, _capability: Capability, _attempted: u32) {}
}

/// Hooks that observe nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFallbackHooks;

impl FallbackHooks for NoopFallbackHooks {}
