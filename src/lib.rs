//! Auditor CLI: analyze and fix Solidity contracts from the terminal, or
//! serve the HTTP API.

pub mod cli;
pub mod logging;
pub mod report;

// Re-export CLI entry points
pub use cli::{parse_args, run_cli_mode, run_with_config, Args, Mode};
pub use report::{render_gauge, render_report};
