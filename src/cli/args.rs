//! CLI argument parsing
//!
//! Grammar:
//! ```text
//! auditor [--config <path>] analyze <file> [--json]
//! auditor [--config <path>] fix <file> [--suggestions <text> | --suggestions-file <path>] [--output <path>]
//! auditor [--config <path>] serve [--host <host>] [--port <port>]
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parsed CLI arguments
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "auditor", version, about = "AI smart-contract auditor for Solidity")]
pub struct Args {
    /// Configuration file (defaults to $AUDITOR_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Mode,
}

/// CLI modes
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Audit a .sol or .txt contract file
    Analyze {
        file: PathBuf,

        /// Print the audit as JSON instead of a report
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Rewrite a contract; audits it first when no suggestions are given
    Fix {
        file: PathBuf,

        /// Issues to fix, as free text
        #[arg(long, conflicts_with = "suggestions_file")]
        suggestions: Option<String>,

        /// Read the issues to fix from a file
        #[arg(long, value_name = "PATH")]
        suggestions_file: Option<PathBuf>,

        /// Write the fixed contract here instead of stdout
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

/// Parse CLI arguments from an argument list (program name first)
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}
