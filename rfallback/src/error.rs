//! Orchestrator-level errors.
//!
//! Provider-local failures never surface here; they are recovered inside the
//! fallback loop. The only errors a caller can see are full exhaustion of a
//! capability's chain and caller-initiated cancellation.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackErrorKind {
    /// Every provider in the chain yielded no result. With a backstop
    /// registered this is unreachable by construction, so callers should
    /// treat it as a configuration fault.
    Exhausted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackError {
    pub kind: FallbackErrorKind,
    pub message: String,
}

impl FallbackError {
    pub fn new(kind: FallbackErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn exhausted(message: impl Into<String>) -> Self {
        Self::new(FallbackErrorKind::Exhausted, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(FallbackErrorKind::Cancelled, message)
    }
}

impl Display for FallbackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for FallbackError {}
