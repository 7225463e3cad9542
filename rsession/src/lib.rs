//! Bounded per-caller session history for the relay generation framework.
//!
//! ```rust
//! use rcommon::CallerId;
//! use rsession::{HistoryEntry, InMemorySessionStore, SessionStore};
//!
//! # async fn demo() -> Result<(), rsession::SessionError> {
//! let store = InMemorySessionStore::new();
//! let caller = CallerId::from("caller-1");
//!
//! store.record(&caller, HistoryEntry::new("gen", "a sunset")).await?;
//! assert_eq!(store.history(&caller).await?.len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub use error::{SessionError, SessionErrorKind};
pub use store::{
    HISTORY_CAPACITY, HistoryEntry, InMemorySessionStore, RESULT_PREVIEW_CHARS, SessionStore,
};
