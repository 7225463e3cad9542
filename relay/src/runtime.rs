//! Runtime wiring helpers for common deployments.

use std::sync::Arc;

use reqwest::Client;
use rfallback::{FallbackHooks, FallbackOrchestrator};
use robserve::{SafeFallbackHooks, TracingFallbackHooks};
use rprovider::ProviderRegistry;
use rsession::{InMemorySessionStore, SessionStore};

use crate::RelayService;
use crate::catalog::default_registry;

#[derive(Clone)]
pub struct RelayBundle {
    pub service: RelayService,
    pub orchestrator: Arc<FallbackOrchestrator>,
}

pub fn in_memory_sessions() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}

/// The stock deployment: default catalog, tracing hooks, in-memory history.
pub fn build_relay(client: Client) -> RelayBundle {
    build_relay_with(
        default_registry(client),
        Arc::new(SafeFallbackHooks::new(TracingFallbackHooks)),
        in_memory_sessions(),
    )
}

pub fn build_relay_with(
    registry: ProviderRegistry,
    hooks: Arc<dyn FallbackHooks>,
    sessions: Arc<dyn SessionStore>,
) -> RelayBundle {
    let orchestrator = Arc::new(FallbackOrchestrator::new(Arc::new(registry)).with_hooks(hooks));
    let service = RelayService::new(Arc::clone(&orchestrator), sessions);

    RelayBundle {
        service,
        orchestrator,
    }
}
