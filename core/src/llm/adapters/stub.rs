//! Stub Adapter
//!
//! Returns canned replies without network calls. Used by tests and by the
//! `stub` provider for offline runs.

use async_trait::async_trait;

use crate::llm::adapters::{GatewayError, LlmAdapter};
use crate::llm::contracts::FIX_OUTPUT_INSTRUCTION;

/// Stub adapter for testing (returns fake responses)
#[derive(Debug, Clone)]
pub struct StubAdapter {
    /// Fixed response; `None` picks a canned reply by prompt kind
    response: Option<String>,
}

impl StubAdapter {
    /// Create new stub adapter with canned audit and fix replies
    pub fn new() -> Self {
        Self { response: None }
    }

    /// Create stub adapter that always answers with `response`
    pub fn with_response(response: String) -> Self {
        Self {
            response: Some(response),
        }
    }

    /// Canned analyze reply, fenced the way models usually answer
    pub fn default_audit_response() -> String {
        r#"```json
[
  {
    "section": "Audit Report",
    "details": "Stub audit: no external model was consulted."
  },
  {
    "section": "Metric Scores",
    "details": [
      { "metric": "Security", "score": 7 },
      { "metric": "Performance", "score": 8 },
      { "metric": "Other Key Areas", "score": 6 },
      { "metric": "Gas Efficiency", "score": 7 },
      { "metric": "Code Quality", "score": 8 },
      { "metric": "Documentation", "score": 5 }
    ]
  },
  {
    "section": "Suggestions for Improvement",
    "details": "Add NatSpec comments to public functions."
  }
]
```"#
            .to_string()
    }

    /// Canned fix reply
    pub fn default_fix_response() -> String {
        "```solidity\n// SPDX-License-Identifier: MIT\npragma solidity ^0.8.20;\n\ncontract Fixed {}\n```"
            .to_string()
    }
}

impl Default for StubAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmAdapter for StubAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        if let Some(ref response) = self.response {
            return Ok(response.clone());
        }
        if prompt.contains(FIX_OUTPUT_INSTRUCTION) {
            Ok(Self::default_fix_response())
        } else {
            Ok(Self::default_audit_response())
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
