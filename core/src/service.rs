//! Audit service
//!
//! Prompt builder, model adapter and extractor wired together. Shared by the
//! HTTP server, the CLI and `AuditSession`. Holds no mutable state.

use std::time::Instant;

use crate::config::AuditorConfig;
use crate::error::AuditError;
use crate::llm::adapters::{create_adapter, Adapter, LlmAdapter};
use crate::llm::contracts::{analyze_prompt, fix_prompt};
use crate::llm::extract::{extract_code, parse_audit_result};
use crate::llm::types::{AuditResult, FixedContract};

/// Analyze and fix operations over one model adapter
#[derive(Debug)]
pub struct AuditService {
    adapter: Adapter,
}

impl AuditService {
    pub fn new(adapter: Adapter) -> Self {
        Self { adapter }
    }

    pub fn from_config(config: &AuditorConfig) -> Self {
        Self::new(create_adapter(config))
    }

    pub fn provider_name(&self) -> &str {
        self.adapter.provider_name()
    }

    /// Ask the model for an audit and parse it into an `AuditResult`
    ///
    /// The contract is sent as-is; callers that want the Solidity heuristic
    /// run `ContractSource::validate` first.
    pub async fn analyze(&self, contract: &str) -> Result<AuditResult, AuditError> {
        let started = Instant::now();
        let prompt = analyze_prompt(contract);
        tracing::debug!(
            provider = self.provider_name(),
            prompt_len = prompt.len(),
            "Requesting audit"
        );

        let text = self.adapter.generate(&prompt).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Audit request failed");
        })?;

        let result = parse_audit_result(&text).inspect_err(|e| {
            tracing::warn!(reason = %e.reason, raw_len = e.raw.len(), "Model returned a malformed audit");
        })?;

        tracing::info!(
            scores = result.metric_scores().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Audit complete"
        );
        Ok(result)
    }

    /// Ask the model to rewrite the contract using `suggestions`
    pub async fn fix(&self, contract: &str, suggestions: &str) -> Result<FixedContract, AuditError> {
        let started = Instant::now();
        let prompt = fix_prompt(contract, suggestions);
        tracing::debug!(
            provider = self.provider_name(),
            prompt_len = prompt.len(),
            "Requesting fix"
        );

        let text = self.adapter.generate(&prompt).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Fix request failed");
        })?;

        let fixed = FixedContract::new(extract_code(&text));
        tracing::info!(
            bytes = fixed.as_str().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fix complete"
        );
        Ok(fixed)
    }
}
