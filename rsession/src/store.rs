//! Session history contracts and the bounded in-memory implementation.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::SystemTime;

use rcommon::{BoxFuture, CallerId, preview};

use crate::SessionError;

/// Newest-last cap on a caller's retained history.
pub const HISTORY_CAPACITY: usize = 50;

/// Cap on the stored result excerpt, in characters.
pub const RESULT_PREVIEW_CHARS: usize = 100;

/// One completed interaction, recorded after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Which operation produced the entry, e.g. `gen` or `ask`.
    pub command: String,
    pub prompt: String,
    /// Provider that ultimately served the request, when one did.
    pub provider_name: Option<String>,
    /// Excerpt of the produced result, capped at [`RESULT_PREVIEW_CHARS`].
    pub result_preview: String,
    pub at: SystemTime,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            prompt: prompt.into(),
            provider_name: None,
            result_preview: String::new(),
            at: SystemTime::now(),
        }
    }

    pub fn with_provider(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = Some(provider_name.into());
        self
    }

    /// Stores a truncated excerpt of `result`; the full payload never lands
    /// in history.
    pub fn with_result(mut self, result: &str) -> Self {
        self.result_preview = preview(result, RESULT_PREVIEW_CHARS);
        self
    }
}

pub trait SessionStore: Send + Sync {
    fn record<'a>(
        &'a self,
        caller: &'a CallerId,
        entry: HistoryEntry,
    ) -> BoxFuture<'a, Result<(), SessionError>>;

    fn history<'a>(
        &'a self,
        caller: &'a CallerId,
    ) -> BoxFuture<'a, Result<Vec<HistoryEntry>, SessionError>>;

    fn clear<'a>(&'a self, caller: &'a CallerId) -> BoxFuture<'a, Result<(), SessionError>>;
}

/// Per-caller ring of the most recent [`HISTORY_CAPACITY`] entries. Older
/// entries are evicted oldest-first; callers never share history.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<CallerId, VecDeque<HistoryEntry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn record<'a>(
        &'a self,
        caller: &'a CallerId,
        entry: HistoryEntry,
    ) -> BoxFuture<'a, Result<(), SessionError>> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| SessionError::store("session store lock poisoned"))?;

            let history = sessions.entry(caller.clone()).or_default();
            if history.len() == HISTORY_CAPACITY {
                history.pop_front();
            }
            history.push_back(entry);

            Ok(())
        })
    }

    fn history<'a>(
        &'a self,
        caller: &'a CallerId,
    ) -> BoxFuture<'a, Result<Vec<HistoryEntry>, SessionError>> {
        Box::pin(async move {
            let sessions = self
                .sessions
                .lock()
                .map_err(|_| SessionError::store("session store lock poisoned"))?;

            Ok(sessions
                .get(caller)
                .map(|history| history.iter().cloned().collect())
                .unwrap_or_default())
        })
    }

    fn clear<'a>(&'a self, caller: &'a CallerId) -> BoxFuture<'a, Result<(), SessionError>> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| SessionError::store("session store lock poisoned"))?;

            sessions.remove(caller);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn history_is_empty_for_unknown_callers() {
        let store = InMemorySessionStore::new();
        let caller = CallerId::from("nobody");
        assert!(store.history(&caller).await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn entries_are_returned_oldest_first() {
        let store = InMemorySessionStore::new();
        let caller = CallerId::from("caller-1");

        store
            .record(&caller, HistoryEntry::new("gen", "a sunset"))
            .await
            .expect("record");
        store
            .record(
                &caller,
                HistoryEntry::new("ask", "why is the sky blue")
                    .with_provider("duck")
                    .with_result("Rayleigh scattering favors shorter wavelengths."),
            )
            .await
            .expect("record");

        let history = store.history(&caller).await.expect("load");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].command, "gen");
        assert_eq!(history[0].result_preview, "");
        assert_eq!(history[1].provider_name.as_deref(), Some("duck"));
        assert_eq!(
            history[1].result_preview,
            "Rayleigh scattering favors shorter wavelengths."
        );
    }

    #[test]
    fn result_previews_are_capped_on_char_boundaries() {
        let long = "é".repeat(150);
        let entry = HistoryEntry::new("ask", "tell me everything").with_result(&long);
        assert_eq!(entry.result_preview.chars().count(), RESULT_PREVIEW_CHARS);
        assert_eq!(entry.result_preview, "é".repeat(RESULT_PREVIEW_CHARS));
    }

    #[tokio::test]
    async fn capacity_evicts_oldest_entries() {
        let store = InMemorySessionStore::new();
        let caller = CallerId::from("caller-1");

        for index in 0..60 {
            store
                .record(&caller, HistoryEntry::new("gen", format!("prompt {index}")))
                .await
                .expect("record");
        }

        let history = store.history(&caller).await.expect("load");
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history[0].prompt, "prompt 10");
        assert_eq!(history[49].prompt, "prompt 59");
    }

    #[tokio::test]
    async fn callers_do_not_share_history() {
        let store = InMemorySessionStore::new();
        let alpha = CallerId::from("alpha");
        let beta = CallerId::from("beta");

        store
            .record(&alpha, HistoryEntry::new("gen", "a castle"))
            .await
            .expect("record");

        assert_eq!(store.history(&alpha).await.expect("load").len(), 1);
        assert!(store.history(&beta).await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn clear_forgets_one_caller_only() {
        let store = InMemorySessionStore::new();
        let alpha = CallerId::from("alpha");
        let beta = CallerId::from("beta");

        store
            .record(&alpha, HistoryEntry::new("gen", "a castle"))
            .await
            .expect("record");
        store
            .record(&beta, HistoryEntry::new("ask", "hello"))
            .await
            .expect("record");

        store.clear(&alpha).await.expect("clear");
        assert!(store.history(&alpha).await.expect("load").is_empty());
        assert_eq!(store.history(&beta).await.expect("load").len(), 1);
    }
}
