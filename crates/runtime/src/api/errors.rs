//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine failures and collaborator failures so clients can bubble
//! them up with consistent context.
use std::fmt;

use arena_core::{AnimationTicket, EngineError, ErrorSeverity, GameError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{kind} collaborator not set")]
    CollaboratorNotSet { kind: CollaboratorKind },

    #[error("session requires an initial match state")]
    MissingState,

    #[error("session requires an ability catalog")]
    MissingCatalog,

    #[error("scripted target provider ran out of selections")]
    ScriptExhausted,

    #[error("animation {ticket:?} failed: {reason}")]
    Animation {
        ticket: AnimationTicket,
        reason: String,
    },
}

impl RuntimeError {
    /// Severity of the underlying failure; collaborator problems are recoverable.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Engine(error) => error.severity(),
            RuntimeError::CollaboratorNotSet { .. }
            | RuntimeError::MissingState
            | RuntimeError::MissingCatalog => ErrorSeverity::Internal,
            RuntimeError::ScriptExhausted | RuntimeError::Animation { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub enum CollaboratorKind {
    Input,
    Animation,
}

impl fmt::Display for CollaboratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CollaboratorKind::Input => "input",
            CollaboratorKind::Animation => "animation",
        };
        write!(f, "{}", label)
    }
}
