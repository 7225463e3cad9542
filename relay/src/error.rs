//! Facade-level errors.
//!
//! Everything transport-specific stays below this layer. A caller-facing
//! error carries a message safe to show verbatim; upstream host names, exit
//! codes, and body excerpts never leak through it.

use std::error::Error;
use std::fmt::{Display, Formatter};

use rfallback::{FallbackError, FallbackErrorKind};
use rsession::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayErrorKind {
    /// The request was rejected before any provider was tried.
    InvalidRequest,
    /// Every provider failed; the caller should retry later.
    Unavailable,
    Cancelled,
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayError {
    pub kind: RelayErrorKind,
    pub message: String,
}

impl RelayError {
    pub fn new(kind: RelayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::InvalidRequest, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Unavailable, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Cancelled, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(RelayErrorKind::Session, message)
    }
}

impl Display for RelayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RelayError {}

impl From<FallbackError> for RelayError {
    fn from(error: FallbackError) -> Self {
        match error.kind {
            FallbackErrorKind::Exhausted => Self::unavailable(
                "generation is temporarily unavailable, please retry in a moment",
            ),
            FallbackErrorKind::Cancelled => Self::cancelled("the request was cancelled"),
        }
    }
}

impl From<SessionError> for RelayError {
    fn from(error: SessionError) -> Self {
        Self::session(error.message)
    }
}
