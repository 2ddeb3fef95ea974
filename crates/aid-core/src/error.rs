// Rust guideline compliant 2026-10-16

//! Error types for the mutual aid core library.

use crate::policy::{Reason, ResourceKind};
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for core operations.
///
/// Every variant is a value handed back to the caller; the core never logs
/// or swallows a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// No resolved identity accompanied the request.
    #[error("Unauthenticated: a valid identity is required")]
    Unauthenticated,

    /// The access policy denied the action.
    #[error("Forbidden: {0}")]
    Forbidden(Reason),

    /// Required input was missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested status edge is not part of the state machine.
    #[error("Invalid {kind} transition from '{from}' to '{to}'")]
    InvalidTransition {
        /// Resource whose state machine rejected the edge.
        kind: ResourceKind,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// A conditional write found a status other than the expected one.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
