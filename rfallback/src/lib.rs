//! Fallback orchestration for the relay generation framework.
//!
//! Providers are ranked per capability; the orchestrator tries them in order
//! and returns the first usable payload. Individual provider failures are
//! absorbed, usage counters are kept per provider, and observation happens
//! through the [`FallbackHooks`] seam rather than inside the loop.
//!
//! ```rust
//! use std::sync::Arc;
//! use rfallback::FallbackOrchestrator;
//! use rprovider::{Capability, GenerationRequest, ProviderRegistry, TextBackstop};
//!
//! # async fn demo() -> Result<(), rfallback::FallbackError> {
//! let registry = ProviderRegistry::builder()
//!     .register(TextBackstop::new("backstop", 99))
//!     .build();
//! let orchestrator = FallbackOrchestrator::new(Arc::new(registry));
//!
//! let generation = orchestrator
//!     .generate(Capability::Text, &GenerationRequest::new("hello"))
//!     .await?;
//! assert_eq!(generation.provider_name, "backstop");
//! # Ok(())
//! # }
//! ```

mod cancel;
mod error;
mod hooks;
mod orchestrator;
mod types;

pub use cancel::CancelToken;
pub use error::{FallbackError, FallbackErrorKind};
pub use hooks::{FallbackHooks, NoopFallbackHooks};
pub use orchestrator::FallbackOrchestrator;
pub use types::{Generation, Sweep};
