//! Engine error kinds.
//!
//! Every operation on the command surface returns `Result<_, EngineError>`
//! rather than panicking across the collaborator boundary. The transport
//! layer maps [`ErrorKind`] to user-facing responses; the message text is
//! for humans and logs.

use thiserror::Error;

/// Coarse error classification for the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown game, player, or card.
    NotFound,
    /// Duplicate join: a player already exists for this (game, user) pair.
    AlreadyExists,
    /// Caller is not allowed to do this (not host, or acting out of turn).
    NotAuthorized,
    /// Operation is not valid in the game's current lifecycle or zone state.
    InvalidState,
    /// Malformed input (bad deck multiplier, unknown card id).
    InvalidArgument,
    /// No cards left anywhere recoverable.
    ExhaustedResource,
    /// Durable commit failed; in-memory state was rolled back.
    Persistence,
}

/// Error returned by engine operations.
///
/// One variant per kind; the payload is the human-readable detail the
/// original server put in its `message` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not authorized: {0}")]
    NotAuthorized(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("out of cards: {0}")]
    ExhaustedResource(String),

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl EngineError {
    /// Classify this error for transport mapping.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound(_) => ErrorKind::NotFound,
            EngineError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            EngineError::NotAuthorized(_) => ErrorKind::NotAuthorized,
            EngineError::InvalidState(_) => ErrorKind::InvalidState,
            EngineError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            EngineError::ExhaustedResource(_) => ErrorKind::ExhaustedResource,
            EngineError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    pub(crate) fn not_found(detail: impl Into<String>) -> Self {
        EngineError::NotFound(detail.into())
    }

    pub(crate) fn already_exists(detail: impl Into<String>) -> Self {
        EngineError::AlreadyExists(detail.into())
    }

    pub(crate) fn not_authorized(detail: impl Into<String>) -> Self {
        EngineError::NotAuthorized(detail.into())
    }

    pub(crate) fn invalid_state(detail: impl Into<String>) -> Self {
        EngineError::InvalidState(detail.into())
    }

    pub(crate) fn invalid_argument(detail: impl Into<String>) -> Self {
        EngineError::InvalidArgument(detail.into())
    }

    pub(crate) fn exhausted(detail: impl Into<String>) -> Self {
        EngineError::ExhaustedResource(detail.into())
    }
}
