//! Error model.
//!
//! Two families live here:
//! - [`DomainError`] for broken domain invariants.
//! - [`StoreError`] for failures reported by the remote product store.
//!
//! Field-level validation failures are *not* errors; they are state (see
//! `finprod_products::ValidationErrorKind`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type returned by product store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

/// Coarse classification of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationErrorKind {
    Network,
    NotFound,
    Conflict,
    Server,
    Unknown,
}

/// Failure reported by a product store.
///
/// Controllers never re-raise these; they convert them into a user-facing message
/// attached to form or list state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The transport could not reach the store.
    #[error("network error: {0}")]
    Network(String),

    /// The addressed product does not exist.
    #[error("not found")]
    NotFound,

    /// The write collided with existing data (e.g. duplicate id).
    #[error("conflict: {}", .0.as_deref().unwrap_or("duplicate id"))]
    Conflict(Option<String>),

    /// The store answered with a failure status.
    #[error("server error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// Anything that does not fit the categories above (e.g. undecodable payload).
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl StoreError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(Some(msg.into()))
    }

    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    pub fn kind(&self) -> OperationErrorKind {
        match self {
            StoreError::Network(_) => OperationErrorKind::Network,
            StoreError::NotFound => OperationErrorKind::NotFound,
            StoreError::Conflict(_) => OperationErrorKind::Conflict,
            StoreError::Server { .. } => OperationErrorKind::Server,
            StoreError::Unknown(_) => OperationErrorKind::Unknown,
        }
    }

    /// Message supplied by the store itself, if any.
    ///
    /// Only conflict and server failures carry one; it is shown to the user verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            StoreError::Conflict(message) | StoreError::Server { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}
