//! CLI mode dispatch
//!
//! Loads configuration, initialises logging, then runs one of:
//! - analyze: audit a contract file and print the report
//! - fix: rewrite a contract file
//! - serve: run the HTTP API

use std::path::Path;

use auditor_api::ApiServer;
use auditor_core::{
    AuditService, AuditSession, AuditorConfig, ContractSource, ErrorKind, SessionError,
    SessionState,
};

use crate::cli::{Args, Error, Mode, Result, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::logging::init_tracing;
use crate::report::render_report;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Run CLI mode and return exit code
///
/// Called from main() after argument parsing.
pub fn run_cli_mode(args: Args) -> ExitCode {
    match AuditorConfig::load(args.config.as_deref()) {
        Ok(config) => run_with_config(args.mode, config),
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Run a mode against an already loaded configuration
///
/// The process environment is not consulted again here.
pub fn run_with_config(mode: Mode, mut config: AuditorConfig) -> ExitCode {
    if let Mode::Serve { host, port } = &mode {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    init_tracing(&config.logging);
    tracing::debug!(llm = ?config.llm, "Configuration loaded");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return EXIT_FAILURE;
        }
    };

    match runtime.block_on(run_mode(mode, &config)) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Run specific CLI mode
async fn run_mode(mode: Mode, config: &AuditorConfig) -> Result<()> {
    match mode {
        Mode::Analyze { file, json } => run_analyze(&file, json, config).await,
        Mode::Fix {
            file,
            suggestions,
            suggestions_file,
            output,
        } => {
            let suggestions = match (suggestions, suggestions_file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => Some(read_text(&path)?),
                (None, None) => None,
            };
            run_fix(&file, suggestions, output.as_deref(), config).await
        }
        Mode::Serve { .. } => {
            let service = AuditService::from_config(config);
            ApiServer::new(config.server.clone(), service).start().await?;
            Ok(())
        }
    }
}

async fn run_analyze(file: &Path, json: bool, config: &AuditorConfig) -> Result<()> {
    let service = AuditService::from_config(config);
    let mut session = AuditSession::default();
    session.load_file(file)?;

    let state = session.analyze(&service).await?;
    ensure_ready(state, &session)?;

    if let Some(result) = session.result() {
        if json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{}", render_report(result));
        }
    }
    Ok(())
}

async fn run_fix(
    file: &Path,
    suggestions: Option<String>,
    output: Option<&Path>,
    config: &AuditorConfig,
) -> Result<()> {
    let service = AuditService::from_config(config);

    let fixed = match suggestions {
        Some(suggestions) => {
            let source = ContractSource::from_file(file).map_err(SessionError::from)?;
            source.validate().map_err(SessionError::from)?;
            service.fix(source.as_str(), &suggestions).await?.into_string()
        }
        None => {
            let mut session = AuditSession::default();
            session.load_file(file)?;

            let state = session.analyze(&service).await?;
            ensure_ready(state, &session)?;
            tracing::info!("Audit complete, requesting fix from suggestions");

            let state = session.fix(&service).await?;
            ensure_ready(state, &session)?;
            session.contract().as_str().to_string()
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &fixed).map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })?;
            eprintln!("Fixed contract written to {}", path.display());
        }
        None => println!("{}", fixed),
    }
    Ok(())
}

fn ensure_ready(state: SessionState, session: &AuditSession) -> Result<()> {
    match state {
        SessionState::Ready => Ok(()),
        SessionState::Failed(kind) => Err(Error::Failed {
            kind,
            message: session
                .last_error()
                .unwrap_or("Model request failed")
                .to_string(),
        }),
        other => Err(Error::Failed {
            kind: ErrorKind::Transport,
            message: format!("Unexpected session state: {}", other),
        }),
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
