//! Unified facade over the relay workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core relay crates and provides the command-facing
//! service, the stock provider catalog, the liveness endpoint, and wiring
//! helpers for common deployments.

pub mod catalog;
pub mod error;
pub mod health;
pub mod prelude;
pub mod runtime;
pub mod service;

pub use rcommon;
pub use rfallback;
pub use robserve;
pub use rprovider;
pub use rsession;

pub use rcommon::{BoxFuture, CallerId};
pub use rfallback::{
    CancelToken, FallbackError, FallbackErrorKind, FallbackHooks, FallbackOrchestrator,
    Generation, NoopFallbackHooks, Sweep,
};
pub use robserve::{MetricsFallbackHooks, SafeFallbackHooks, TracingFallbackHooks};
pub use rprovider::{
    BridgeProvider, Capability, GenProvider, GenerationRequest, HttpEndpointDescriptor,
    HttpExchange, HttpProvider, ImageBackstop, Payload, ProviderError, ProviderErrorKind,
    ProviderListing, ProviderRegistry, RegistryBuilder, ReqwestExchange, ResponseShape,
    TextBackstop, UsageSnapshot, UsageStats,
};
pub use rsession::{
    HISTORY_CAPACITY, HistoryEntry, InMemorySessionStore, SessionError, SessionStore,
};

pub use catalog::default_registry;
pub use error::{RelayError, RelayErrorKind};
pub use health::serve_health;
pub use runtime::{RelayBundle, build_relay, build_relay_with, in_memory_sessions};
pub use service::{MAX_PROMPT_CHARS, RelayService, StatsReport};
