//! Session errors
//!
//! Error types for rejected session actions. Model failures are not
//! session errors; they land in `SessionState::Failed`.

use crate::llm::session::session_state::PendingAction;
use crate::source::{SourceError, ValidationError};

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("No audit result available")]
    NoResult,

    #[error("Cannot {action} while session is {state}")]
    InvalidTransition {
        action: PendingAction,
        state: String,
    },
}
