//! API Models
//!
//! Request and response bodies. Field names follow the browser client:
//! `auditResults` and `fixedContract` on success, `{error, detail?}` on
//! failure.

use auditor_core::{AuditResult, FixedContract};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-contract`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeContractRequest {
    pub contract: String,
}

/// Body of `POST /api/fix-contract`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixContractRequest {
    pub contract: String,
    pub suggestions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeContractResponse {
    pub audit_results: AuditResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixContractResponse {
    pub fixed_contract: FixedContract,
}

/// Failure envelope, always sent with status 500
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
