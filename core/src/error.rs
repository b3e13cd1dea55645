//! Crate-level error type
//!
//! Every library error folds into `AuditError`; `kind()` gives the coarse
//! category surfaces use for exit codes and session state.

use std::fmt;

use serde::Serialize;

use crate::config::ConfigError;
use crate::llm::adapters::GatewayError;
use crate::llm::extract::MalformedResponse;
use crate::llm::session::SessionError;
use crate::source::{SourceError, ValidationError};

/// Coarse error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Transport,
    MalformedResponse,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Config => "config",
            ErrorKind::Transport => "transport",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Validation => "validation",
        };
        f.write_str(s)
    }
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::MissingCredential { .. } => ErrorKind::Config,
            GatewayError::Network(_) | GatewayError::Http { .. } => ErrorKind::Transport,
            GatewayError::InvalidResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Auditor errors
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Malformed(#[from] MalformedResponse),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuditError::Gateway(e) => e.kind(),
            AuditError::Malformed(_) => ErrorKind::MalformedResponse,
            AuditError::Validation(_) | AuditError::Source(_) | AuditError::Session(_) => {
                ErrorKind::Validation
            }
            AuditError::Config(_) => ErrorKind::Config,
        }
    }

    /// Upstream body for HTTP failures, raw model text for malformed replies
    pub fn detail(&self) -> Option<&str> {
        match self {
            AuditError::Gateway(GatewayError::Http { body, .. }) => Some(body),
            AuditError::Malformed(e) => Some(&e.raw),
            _ => None,
        }
    }
}
