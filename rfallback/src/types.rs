use rprovider::Payload;

/// One successful generation, tagged with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub payload: Payload,
    pub provider_name: String,
}

impl Generation {
    pub fn new(payload: Payload, provider_name: impl Into<String>) -> Self {
        Self {
            payload,
            provider_name: provider_name.into(),
        }
    }
}

/// Outcome of a broadcast sweep across every provider of a capability.
///
/// `attempted` counts every provider tried, including the ones that failed;
/// `generations` holds only the successes, in chain order.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    pub generations: Vec<Generation>,
    pub attempted: usize,
}

impl Sweep {
    pub fn succeeded(&self) -> usize {
        self.generations.len()
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.generations.len()
    }
}
