//! Provider error kinds and error value helpers.
//!
//! ```rust
//! use rprovider::{ProviderError, ProviderErrorKind};
//!
//! let timeout = ProviderError::timeout("attempt exceeded 45s");
//! assert_eq!(timeout.kind, ProviderErrorKind::Timeout);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Diagnostic classification of a failed provider attempt.
///
/// Every kind collapses to "no result, try the next provider" inside the
/// orchestrator; the kind is retained only for hooks and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    TransportUnreachable,
    Timeout,
    MalformedResponse,
    DecodeFailure,
    CapabilityMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::TransportUnreachable, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::MalformedResponse, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::DecodeFailure, message)
    }

    pub fn capability_mismatch(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::CapabilityMismatch, message)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}
