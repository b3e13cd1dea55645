//! API Handlers Module
//!
//! Request handlers for the audit endpoints. Every failure, including an
//! unreadable request body, is answered with status 500 and an
//! `ErrorResponse`.

use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use auditor_core::{AuditError, AuditService, GatewayError};

use crate::models::{
    AnalyzeContractRequest, AnalyzeContractResponse, ErrorResponse, FixContractRequest,
    FixContractResponse, HealthResponse,
};

/// Shared state of the API server
#[derive(Debug)]
pub struct ApiState {
    /// Analyze/fix operations over the configured model
    pub service: AuditService,
}

/// Error returned by the handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub ErrorResponse);

impl ApiError {
    fn from_audit(action: &str, err: &AuditError) -> Self {
        let error = match err {
            AuditError::Gateway(GatewayError::Http { status, .. }) => {
                format!("Model {} error (HTTP {})", action, status)
            }
            other => other.to_string(),
        };
        ApiError(ErrorResponse {
            error,
            detail: err.detail().map(str::to_string),
        })
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ErrorResponse {
            error: "Invalid request body".to_string(),
            detail: Some(rejection.body_text()),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.0)).into_response()
    }
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "auditor-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Audit a contract
#[debug_handler]
pub async fn analyze_contract(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<AnalyzeContractRequest>, JsonRejection>,
) -> Result<Json<AnalyzeContractResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let Json(request) = payload.inspect_err(|e| {
        tracing::warn!(%request_id, error = %e, "Rejected analyze request body");
    })?;
    tracing::info!(%request_id, contract_len = request.contract.len(), "Analyze contract");

    match state.service.analyze(&request.contract).await {
        Ok(audit_results) => Ok(Json(AnalyzeContractResponse { audit_results })),
        Err(e) => {
            tracing::error!(%request_id, kind = %e.kind(), error = %e, "Analyze failed");
            Err(ApiError::from_audit("analyze", &e))
        }
    }
}

/// Rewrite a contract using audit suggestions
#[debug_handler]
pub async fn fix_contract(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<FixContractRequest>, JsonRejection>,
) -> Result<Json<FixContractResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let Json(request) = payload.inspect_err(|e| {
        tracing::warn!(%request_id, error = %e, "Rejected fix request body");
    })?;
    tracing::info!(
        %request_id,
        contract_len = request.contract.len(),
        suggestions_len = request.suggestions.len(),
        "Fix contract"
    );

    match state
        .service
        .fix(&request.contract, &request.suggestions)
        .await
    {
        Ok(fixed_contract) => Ok(Json(FixContractResponse { fixed_contract })),
        Err(e) => {
            tracing::error!(%request_id, kind = %e.kind(), error = %e, "Fix failed");
            Err(ApiError::from_audit("fix", &e))
        }
    }
}
