use std::panic::{AssertUnwindSafe, catch_unwind};

use rfallback::FallbackHooks;
use rprovider::{Capability, ProviderError};

/// Wrapper that keeps a panicking hook implementation from taking the
/// fallback chain down with it.
pub struct SafeFallbackHooks<H> {
    inner: H,
}

impl<H> SafeFallbackHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> FallbackHooks for SafeFallbackHooks<H>
where
    H: FallbackHooks,
{
    fn on_attempt_start(&self, provider: &str, capability: Capability) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(provider, capability)
        }));
    }

    fn on_attempt_failure(
        &self,
        provider: &str,
        capability: Capability,
        error: Option<&ProviderError>,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_failure(provider, capability, error)
        }));
    }

    fn on_generation_success(&self, provider: &str, capability: Capability, rank: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_generation_success(provider, capability, rank)
        }));
    }

    fn on_exhausted(&self, capability: Capability, attempted: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exhausted(capability, attempted)
        }));
    }
}
