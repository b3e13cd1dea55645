//! Auditor binary
//!
//! Parses arguments, then hands off to `run_cli_mode` which owns config,
//! logging and the async runtime.

use clap::Parser;

use auditor::cli::{run_cli_mode, Args};

fn main() {
    let args = Args::parse();
    std::process::exit(run_cli_mode(args));
}
