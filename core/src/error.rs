//! Error types for the Forvo API client.
//!
//! # Design
//! There are exactly two failure kinds. `ValidationError` is raised locally
//! before any network I/O. `ForvoError::Transport` carries whatever the
//! transport reported, untouched: no status classification, no retry hints.
//! Callers that need the raw transport error call `into_transport`, or walk
//! `source()`, which yields it directly.

use thiserror::Error;

/// Parameter problems detected before a request is built.
///
/// The messages are fixed strings; downstream code matches on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Parameters should be an object")]
    NotAnObject,

    /// A required parameter is absent or falsy.
    #[error("{0} is a required parameter")]
    MissingParameter(String),

    /// A JSON parameter was an array or a nested object.
    #[error("{0} should be a string, number or boolean")]
    UnsupportedValue(String),
}

/// Errors returned by `ForvoClient` operations.
#[derive(Debug, Error)]
pub enum ForvoError<E> {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Transport(#[source] E),
}

impl<E> ForvoError<E> {
    pub fn is_validation(&self) -> bool {
        matches!(self, ForvoError::Validation(_))
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ForvoError::Validation(err) => Some(err),
            ForvoError::Transport(_) => None,
        }
    }

    /// Unwrap the transport error exactly as the transport returned it.
    pub fn into_transport(self) -> Option<E> {
        match self {
            ForvoError::Transport(err) => Some(err),
            ForvoError::Validation(_) => None,
        }
    }
}
