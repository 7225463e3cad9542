//! Command-facing service over the fallback orchestrator.
//!
//! The service owns the validation, history bookkeeping, and error shaping
//! that sit between an inbound command and the orchestrator. It holds no
//! per-request state; every method takes the caller identity explicitly.

use std::sync::Arc;

use rcommon::CallerId;
use rfallback::{CancelToken, FallbackOrchestrator, Generation, Sweep};
use rprovider::{Capability, GenerationRequest, ProviderListing, UsageSnapshot};
use rsession::{HistoryEntry, SessionStore};

use crate::RelayError;

/// Hard cap on accepted prompt length, in characters.
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Usage counters for both capabilities, chain order within each.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub image: Vec<UsageSnapshot>,
    pub text: Vec<UsageSnapshot>,
}

#[derive(Clone)]
pub struct RelayService {
    orchestrator: Arc<FallbackOrchestrator>,
    sessions: Arc<dyn SessionStore>,
}

impl RelayService {
    pub fn new(orchestrator: Arc<FallbackOrchestrator>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            orchestrator,
            sessions,
        }
    }

    /// Full fallback chain for one capability; the caller sees either a
    /// payload or a retry-later error. Successful generations land in the
    /// caller's history.
    pub async fn handle(
        &self,
        caller: &CallerId,
        capability: Capability,
        request: GenerationRequest,
    ) -> Result<Generation, RelayError> {
        validate(&request)?;

        let generation = self.orchestrator.generate(capability, &request).await?;
        self.record(caller, capability, &request, Some(&generation))
            .await?;
        Ok(generation)
    }

    /// Fast variant: only the first `limit` providers of the chain.
    pub async fn handle_fast(
        &self,
        caller: &CallerId,
        capability: Capability,
        request: GenerationRequest,
        limit: usize,
    ) -> Result<Generation, RelayError> {
        validate(&request)?;

        let generation = self
            .orchestrator
            .generate_fast(capability, &request, limit)
            .await?;
        self.record(caller, capability, &request, Some(&generation))
            .await?;
        Ok(generation)
    }

    /// Broadcast across every provider of the capability. Always returns the
    /// sweep; zero successes is a valid outcome the caller can present.
    pub async fn handle_all(
        &self,
        caller: &CallerId,
        capability: Capability,
        request: GenerationRequest,
    ) -> Result<Sweep, RelayError> {
        validate(&request)?;

        let sweep = self.orchestrator.generate_all(capability, &request).await;
        self.record(caller, capability, &request, None).await?;
        Ok(sweep)
    }

    /// Like [`handle`](Self::handle), but abandons the chain when `token`
    /// fires.
    pub async fn handle_cancellable(
        &self,
        caller: &CallerId,
        capability: Capability,
        request: GenerationRequest,
        token: &CancelToken,
    ) -> Result<Generation, RelayError> {
        validate(&request)?;

        let generation = self
            .orchestrator
            .generate_cancellable(capability, &request, token)
            .await?;
        self.record(caller, capability, &request, Some(&generation))
            .await?;
        Ok(generation)
    }

    pub async fn history(&self, caller: &CallerId) -> Result<Vec<HistoryEntry>, RelayError> {
        Ok(self.sessions.history(caller).await?)
    }

    pub async fn clear_history(&self, caller: &CallerId) -> Result<(), RelayError> {
        Ok(self.sessions.clear(caller).await?)
    }

    pub fn list_providers(&self, capability: Capability) -> Vec<ProviderListing> {
        self.orchestrator.registry().listings(capability)
    }

    pub fn snapshot_stats(&self) -> StatsReport {
        StatsReport {
            image: self.orchestrator.snapshot(Capability::Image),
            text: self.orchestrator.snapshot(Capability::Text),
        }
    }

    async fn record(
        &self,
        caller: &CallerId,
        capability: Capability,
        request: &GenerationRequest,
        generation: Option<&Generation>,
    ) -> Result<(), RelayError> {
        let mut entry = HistoryEntry::new(command_for(capability), request.prompt.clone());
        if let Some(generation) = generation {
            // Text results are excerpted directly; binary payloads keep the
            // serving provider's name as the excerpt.
            let excerpt = generation
                .payload
                .as_text()
                .unwrap_or(generation.provider_name.as_str());
            entry = entry
                .with_provider(generation.provider_name.as_str())
                .with_result(excerpt);
        }
        Ok(self.sessions.record(caller, entry).await?)
    }
}

fn command_for(capability: Capability) -> &'static str {
    match capability {
        Capability::Image => "gen",
        Capability::Text => "ask",
    }
}

fn validate(request: &GenerationRequest) -> Result<(), RelayError> {
    if request.prompt.trim().is_empty() {
        return Err(RelayError::invalid_request("prompt must not be empty"));
    }
    if request.prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(RelayError::invalid_request(format!(
            "prompt exceeds {MAX_PROMPT_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelayErrorKind;
    use rprovider::{ImageBackstop, ProviderRegistry, TextBackstop};
    use rsession::{InMemorySessionStore, RESULT_PREVIEW_CHARS};

    fn backstop_service() -> RelayService {
        let registry = ProviderRegistry::builder()
            .register(TextBackstop::new("backstop", 99))
            .build();
        RelayService::new(
            Arc::new(FallbackOrchestrator::new(Arc::new(registry))),
            Arc::new(InMemorySessionStore::new()),
        )
    }

    #[tokio::test]
    async fn empty_prompts_are_rejected_before_any_attempt() {
        let service = backstop_service();
        let caller = CallerId::from("caller-1");

        let error = service
            .handle(&caller, Capability::Text, GenerationRequest::new("   "))
            .await
            .expect_err("blank prompt");
        assert_eq!(error.kind, RelayErrorKind::InvalidRequest);

        // Nothing was attempted, so nothing was recorded.
        assert!(service.snapshot_stats().text[0].last_used.is_none());
        assert!(service.history(&caller).await.expect("history").is_empty());
    }

    #[tokio::test]
    async fn oversized_prompts_are_rejected() {
        let service = backstop_service();
        let caller = CallerId::from("caller-1");

        let prompt = "x".repeat(MAX_PROMPT_CHARS + 1);
        let error = service
            .handle(&caller, Capability::Text, GenerationRequest::new(prompt))
            .await
            .expect_err("oversized prompt");
        assert_eq!(error.kind, RelayErrorKind::InvalidRequest);
    }

    #[tokio::test]
    async fn successful_generation_is_recorded_in_history() {
        let service = backstop_service();
        let caller = CallerId::from("caller-1");

        let generation = service
            .handle(&caller, Capability::Text, GenerationRequest::new("hello"))
            .await
            .expect("backstop answers");
        assert_eq!(generation.provider_name, "backstop");

        let history = service.history(&caller).await.expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].command, "ask");
        assert_eq!(history[0].provider_name.as_deref(), Some("backstop"));

        // The backstop reply is longer than the cap, so the excerpt is cut
        // at exactly the cap.
        assert_eq!(
            history[0].result_preview.chars().count(),
            RESULT_PREVIEW_CHARS
        );
        let full = generation.payload.as_text().expect("text payload");
        assert!(full.starts_with(&history[0].result_preview));
    }

    #[tokio::test]
    async fn binary_results_record_the_provider_name_as_preview() {
        let registry = ProviderRegistry::builder()
            .register(ImageBackstop::new("image-backstop", 99))
            .build();
        let service = RelayService::new(
            Arc::new(FallbackOrchestrator::new(Arc::new(registry))),
            Arc::new(InMemorySessionStore::new()),
        );
        let caller = CallerId::from("caller-1");

        service
            .handle(&caller, Capability::Image, GenerationRequest::new("a fox"))
            .await
            .expect("image backstop answers");

        let history = service.history(&caller).await.expect("history");
        assert_eq!(history[0].command, "gen");
        assert_eq!(history[0].result_preview, "image-backstop");
    }

    #[tokio::test]
    async fn empty_image_chain_surfaces_as_unavailable() {
        let service = backstop_service();
        let caller = CallerId::from("caller-1");

        let error = service
            .handle(&caller, Capability::Image, GenerationRequest::new("a cat"))
            .await
            .expect_err("no image providers registered");
        assert_eq!(error.kind, RelayErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn clear_history_forgets_the_caller() {
        let service = backstop_service();
        let caller = CallerId::from("caller-1");

        service
            .handle(&caller, Capability::Text, GenerationRequest::new("hello"))
            .await
            .expect("backstop answers");
        service.clear_history(&caller).await.expect("clear");
        assert!(service.history(&caller).await.expect("history").is_empty());
    }

    #[test]
    fn listings_expose_the_ranked_chain() {
        let service = backstop_service();
        let listings = service.list_providers(Capability::Text);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "backstop");
    }
}
