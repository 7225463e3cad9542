//! The uniform provider contract every upstream integration implements.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::{Capability, GenerationRequest, Payload, ProviderError};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One upstream integration implementing a single capability.
///
/// `attempt` must never let a fault escape its boundary: transport errors,
/// timeouts, malformed responses, and decode failures are caught internally
/// and returned as a typed [`ProviderError`]. `Ok(None)` and `Err(_)` are
/// equivalent to the orchestrator: both mean "no result, try the next
/// provider"; the error value carries diagnostic detail only.
pub trait GenProvider: Send + Sync {
    fn name(&self) -> &str;

    fn capability(&self) -> Capability;

    /// Lower values are tried first; ties break by registration order.
    fn priority(&self) -> u32;

    /// Per-attempt budget. Transport latencies differ by an order of
    /// magnitude between a local bridge process and a remote HTTP call, so
    /// each provider carries its own.
    fn timeout(&self) -> Duration;

    fn attempt<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> ProviderFuture<'a, Result<Option<Payload>, ProviderError>>;
}
