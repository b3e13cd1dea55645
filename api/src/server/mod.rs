//! API Server Module
//!
//! Router construction and the listening loop.

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use auditor_core::config::ServerConfig;
use auditor_core::AuditService;

use crate::handlers::{analyze_contract, fix_contract, health_check, ApiState};

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ServerConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ServerConfig, service: AuditService) -> Self {
        let state = Arc::new(ApiState { service });
        Self { config, state }
    }

    /// Build the application router
    pub fn router(&self) -> Result<Router> {
        let app = Router::new()
            .route("/api/analyze-contract", post(analyze_contract))
            .route("/api/fix-contract", post(fix_contract))
            // Health check
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        match cors_layer(&self.config.cors_origins)? {
            Some(cors) => Ok(app.layer(cors)),
            None => Ok(app),
        }
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        let app = self.router()?;
        let addr = self.config.bind_addr();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!(
            addr = %addr,
            provider = self.state.service.provider_name(),
            "Auditor API server listening"
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        Ok(())
    }
}

fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    ))
}
