//! Ordered provider registry, built once at process start.
//!
//! ```rust
//! use rprovider::{Capability, ProviderRegistry, TextBackstop};
//!
//! let registry = ProviderRegistry::builder()
//!     .register(TextBackstop::new("backstop", 99))
//!     .build();
//!
//! assert_eq!(registry.len(Capability::Text), 1);
//! assert!(registry.is_empty(Capability::Image));
//! ```

use std::sync::Arc;

use crate::{Capability, GenProvider, UsageSnapshot, UsageStats};

/// A provider paired with the stats the registry owns for it.
#[derive(Clone)]
pub struct ProviderEntry {
    provider: Arc<dyn GenProvider>,
    stats: Arc<UsageStats>,
}

impl ProviderEntry {
    fn new(provider: Arc<dyn GenProvider>) -> Self {
        Self {
            provider,
            stats: Arc::new(UsageStats::new()),
        }
    }

    pub fn provider(&self) -> &Arc<dyn GenProvider> {
        &self.provider
    }

    pub fn stats(&self) -> &Arc<UsageStats> {
        &self.stats
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        self.stats.snapshot(self.provider.name())
    }
}

/// Name and priority of one registered provider, for listing commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderListing {
    pub name: String,
    pub priority: u32,
}

/// Holds the two ordered provider sequences. Read-only after `build`; both
/// lists stay sorted ascending by priority, ties preserving registration
/// order.
#[derive(Default)]
pub struct ProviderRegistry {
    image: Vec<ProviderEntry>,
    text: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn enumerate(&self, capability: Capability) -> &[ProviderEntry] {
        match capability {
            Capability::Image => &self.image,
            Capability::Text => &self.text,
        }
    }

    pub fn listings(&self, capability: Capability) -> Vec<ProviderListing> {
        self.enumerate(capability)
            .iter()
            .map(|entry| ProviderListing {
                name: entry.provider.name().to_string(),
                priority: entry.provider.priority(),
            })
            .collect()
    }

    pub fn snapshots(&self, capability: Capability) -> Vec<UsageSnapshot> {
        self.enumerate(capability)
            .iter()
            .map(ProviderEntry::snapshot)
            .collect()
    }

    pub fn len(&self, capability: Capability) -> usize {
        self.enumerate(capability).len()
    }

    pub fn is_empty(&self, capability: Capability) -> bool {
        self.enumerate(capability).is_empty()
    }
}

/// Single batch registration. Providers land in the list matching their
/// declared capability; `build` sorts each list by ascending priority with a
/// stable sort so equal priorities keep registration order.
#[derive(Default)]
pub struct RegistryBuilder {
    image: Vec<ProviderEntry>,
    text: Vec<ProviderEntry>,
}

impl RegistryBuilder {
    pub fn register<P>(self, provider: P) -> Self
    where
        P: GenProvider + 'static,
    {
        self.register_arc(Arc::new(provider))
    }

    pub fn register_arc(mut self, provider: Arc<dyn GenProvider>) -> Self {
        let entry = ProviderEntry::new(provider);
        match entry.provider.capability() {
            Capability::Image => self.image.push(entry),
            Capability::Text => self.text.push(entry),
        }
        self
    }

    pub fn build(mut self) -> ProviderRegistry {
        self.image.sort_by_key(|entry| entry.provider.priority());
        self.text.sort_by_key(|entry| entry.provider.priority());

        ProviderRegistry {
            image: self.image,
            text: self.text,
        }
    }
}
