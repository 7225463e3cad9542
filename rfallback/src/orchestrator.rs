//! Sequential fallback over ranked provider chains.
//!
//! The orchestrator walks one capability's providers in priority order and
//! returns the first usable payload. A provider that errors, returns an
//! empty result, or exceeds its own timeout budget is absorbed and the walk
//! moves on; the caller only sees an error once the whole chain is spent.
//! There is no same-provider retry: the next provider in the chain is the
//! retry.

use std::sync::Arc;

use futures_util::future::join_all;
use rprovider::{
    Capability, GenerationRequest, Payload, ProviderEntry, ProviderError, ProviderRegistry,
    UsageSnapshot,
};

use crate::cancel::CancelToken;
use crate::error::FallbackError;
use crate::hooks::{FallbackHooks, NoopFallbackHooks};
use crate::types::{Generation, Sweep};

pub struct FallbackOrchestrator {
    registry: Arc<ProviderRegistry>,
    hooks: Arc<dyn FallbackHooks>,
}

impl FallbackOrchestrator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopFallbackHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn FallbackHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// First usable payload from the capability's chain.
    pub async fn generate(
        &self,
        capability: Capability,
        request: &GenerationRequest,
    ) -> Result<Generation, FallbackError> {
        self.run_chain(capability, request, None, None).await
    }

    /// Like [`generate`](Self::generate), but walks only the first `limit`
    /// providers of the chain. Lower-ranked providers are skipped outright.
    pub async fn generate_fast(
        &self,
        capability: Capability,
        request: &GenerationRequest,
        limit: usize,
    ) -> Result<Generation, FallbackError> {
        self.run_chain(capability, request, Some(limit), None).await
    }

    /// Like [`generate`](Self::generate), but abandons the chain as soon as
    /// `token` is cancelled. A cancelled in-flight attempt is dropped and
    /// records no usage.
    pub async fn generate_cancellable(
        &self,
        capability: Capability,
        request: &GenerationRequest,
        token: &CancelToken,
    ) -> Result<Generation, FallbackError> {
        self.run_chain(capability, request, None, Some(token)).await
    }

    /// Broadcast sweep: try every provider of the capability at once,
    /// regardless of earlier successes, collecting each result. Failures are
    /// isolated per provider, so one unreachable upstream never hides the
    /// others. Results come back in chain order even though the attempts
    /// race.
    pub async fn generate_all(
        &self,
        capability: Capability,
        request: &GenerationRequest,
    ) -> Sweep {
        let attempts = self
            .registry
            .enumerate(capability)
            .iter()
            .enumerate()
            .map(|(rank, entry)| async move {
                let name = entry.provider().name().to_string();
                self.hooks.on_attempt_start(&name, capability);
                let outcome = self.try_entry(entry, capability, request).await;
                (rank, entry, name, outcome)
            });

        let mut sweep = Sweep::default();
        for (rank, entry, name, outcome) in join_all(attempts).await {
            sweep.attempted += 1;
            match outcome {
                Ok(Some(payload)) => {
                    entry.stats().record_success();
                    self.hooks
                        .on_generation_success(&name, capability, rank as u32);
                    sweep.generations.push(Generation::new(payload, name));
                }
                Ok(None) => {
                    entry.stats().record_failure();
                    self.hooks.on_attempt_failure(&name, capability, None);
                }
                Err(error) => {
                    entry.stats().record_failure();
                    self.hooks.on_attempt_failure(&name, capability, Some(&error));
                }
            }
        }

        sweep
    }

    /// Usage counters for every registered provider, chain order.
    pub fn snapshot(&self, capability: Capability) -> Vec<UsageSnapshot> {
        self.registry.snapshots(capability)
    }

    async fn run_chain(
        &self,
        capability: Capability,
        request: &GenerationRequest,
        limit: Option<usize>,
        token: Option<&CancelToken>,
    ) -> Result<Generation, FallbackError> {
        let mut attempted: u32 = 0;
        let entries = self.registry.enumerate(capability);
        let entries = match limit {
            Some(limit) => &entries[..limit.min(entries.len())],
            None => entries,
        };

        for (rank, entry) in entries.iter().enumerate() {
            if let Some(token) = token {
                if token.is_cancelled() {
                    return Err(FallbackError::cancelled("caller abandoned the request"));
                }
            }

            attempted += 1;
            let name = entry.provider().name().to_string();
            self.hooks.on_attempt_start(&name, capability);

            let outcome = match token {
                Some(token) => {
                    tokio::select! {
                        outcome = self.try_entry(entry, capability, request) => outcome,
                        _ = token.cancelled() => {
                            return Err(FallbackError::cancelled(
                                "caller abandoned the request",
                            ));
                        }
                    }
                }
                None => self.try_entry(entry, capability, request).await,
            };

            match outcome {
                Ok(Some(payload)) => {
                    entry.stats().record_success();
                    self.hooks
                        .on_generation_success(&name, capability, rank as u32);
                    return Ok(Generation::new(payload, name));
                }
                Ok(None) => {
                    entry.stats().record_failure();
                    self.hooks.on_attempt_failure(&name, capability, None);
                }
                Err(error) => {
                    entry.stats().record_failure();
                    self.hooks.on_attempt_failure(&name, capability, Some(&error));
                }
            }
        }

        self.hooks.on_exhausted(capability, attempted);
        Err(FallbackError::exhausted(format!(
            "all {attempted} {capability} providers failed"
        )))
    }

    /// One attempt, boxed inside the provider's own timeout budget. A
    /// mismatched capability is recorded as a failure rather than trusted.
    async fn try_entry(
        &self,
        entry: &ProviderEntry,
        capability: Capability,
        request: &GenerationRequest,
    ) -> Result<Option<Payload>, ProviderError> {
        let provider = entry.provider();
        if provider.capability() != capability {
            return Err(ProviderError::capability_mismatch(format!(
                "provider {} serves {}, not {}",
                provider.name(),
                provider.capability(),
                capability
            )));
        }

        match tokio::time::timeout(provider.timeout(), provider.attempt(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::timeout(format!(
                "no reply within {:?}",
                provider.timeout()
            ))),
        }
    }
}
