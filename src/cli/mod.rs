//! CLI module
//!
//! Provides:
//! - Argument parsing for the analyze, fix and serve modes
//! - Mode dispatch with deterministic exit codes

pub mod args;
pub mod dispatch;

use std::path::PathBuf;

use auditor_core::{AuditError, ConfigError, ErrorKind, SessionError};

// Re-exports
pub use args::{parse_args, Args, Mode};
pub use dispatch::{run_cli_mode, run_with_config, ExitCode};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    /// A session action that ended in `SessionState::Failed`
    #[error("{message}")]
    Failed { kind: ErrorKind, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0:#}")]
    Server(#[from] anyhow::Error),
}

impl Error {
    /// Exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let kind = match self {
            Error::Config(_) => Some(ErrorKind::Config),
            Error::Audit(e) => Some(e.kind()),
            Error::Failed { kind, .. } => Some(*kind),
            _ => None,
        };
        match kind {
            Some(ErrorKind::Config) => EXIT_CONFIG_ERROR,
            _ => EXIT_FAILURE,
        }
    }
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
