//! Convenience re-exports for application code.

pub use rcommon::CallerId;
pub use rfallback::{
    CancelToken, FallbackError, FallbackErrorKind, FallbackHooks, FallbackOrchestrator,
    Generation, NoopFallbackHooks, Sweep,
};
pub use rprovider::{
    Capability, GenProvider, GenerationRequest, Payload, ProviderError, ProviderErrorKind,
    ProviderRegistry,
};
pub use rsession::{HistoryEntry, InMemorySessionStore, SessionStore};

pub use crate::{
    RelayBundle, RelayError, RelayErrorKind, RelayService, StatsReport, build_relay,
    build_relay_with, default_registry, serve_health,
};
