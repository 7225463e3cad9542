//! Provider abstraction for the relay generation framework.
//!
//! A provider implements one capability (image or text) against one upstream
//! transport: a declarative HTTP endpoint, an external runtime bridge
//! process, or a deterministic local backstop. The registry holds the ranked
//! provider lists the fallback orchestrator walks.
//!
//! ```rust
//! use rprovider::{Capability, ProviderRegistry, ImageBackstop, TextBackstop};
//!
//! let registry = ProviderRegistry::builder()
//!     .register(ImageBackstop::new("image-backstop", 99))
//!     .register(TextBackstop::new("text-backstop", 99))
//!     .build();
//!
//! assert_eq!(registry.len(Capability::Image), 1);
//! assert_eq!(registry.len(Capability::Text), 1);
//! ```

mod backstop;
mod bridge;
mod error;
mod http;
mod provider;
mod registry;
mod stats;
mod types;

pub use backstop::{ImageBackstop, TextBackstop};
pub use bridge::{BridgeProvider, PROMPT_JSON_PLACEHOLDER, SYSTEM_JSON_PLACEHOLDER};
pub use error::{ProviderError, ProviderErrorKind};
pub use http::{
    HttpCall, HttpEndpointDescriptor, HttpExchange, HttpMethod, HttpProvider, HttpReply,
    PROMPT_PLACEHOLDER, ReqwestExchange, ResponseShape, SEED_PLACEHOLDER, SYSTEM_PLACEHOLDER,
};
pub use provider::{GenProvider, ProviderFuture};
pub use registry::{ProviderEntry, ProviderListing, ProviderRegistry, RegistryBuilder};
pub use stats::{UsageSnapshot, UsageStats};
pub use types::{Capability, GenerationRequest, Payload};
