//! Gemini Adapter
//!
//! Google `generateContent` HTTP API adapter. The credential travels in the
//! query string, so URLs are redacted before they reach the logs.

use std::time::Instant;

use async_trait::async_trait;

use crate::llm::adapters::transport::{JsonTransport, ReqwestTransport, Transport};
use crate::llm::adapters::{GatewayError, LlmAdapter};

pub use crate::llm::adapters::gemini_parse::{build_generate_request, parse_generate_content};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini adapter
#[derive(Debug)]
pub struct GeminiAdapter {
    /// Base URL (e.g., https://generativelanguage.googleapis.com/v1)
    base_url: String,
    /// Model name (e.g., gemini-2.5-flash)
    model: String,
    /// API key; absence is reported per call, not at construction
    api_key: Option<String>,
    /// HTTP transport
    transport: Transport,
}

impl GeminiAdapter {
    /// Create new Gemini adapter
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self::with_transport(
            base_url,
            model,
            api_key,
            Transport::Real(ReqwestTransport::new()),
        )
    }

    /// Create adapter with custom transport (for testing)
    pub fn with_transport(
        base_url: String,
        model: String,
        api_key: Option<String>,
        transport: Transport,
    ) -> Self {
        Self {
            base_url,
            model,
            api_key,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl LlmAdapter for GeminiAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let api_key = self
            .credential()
            .ok_or_else(|| GatewayError::MissingCredential {
                provider: self.provider_name().to_string(),
            })?;

        let endpoint = self.endpoint();
        let url = format!("{}?key={}", endpoint, api_key);
        let body = build_generate_request(prompt)?;
        let headers = [("Content-Type", "application/json")];

        tracing::debug!(
            url = %format!("{}?key=***", endpoint),
            model = %self.model,
            prompt_length = prompt.len(),
            "Sending generateContent request"
        );

        let start = Instant::now();
        let response = match self.transport.post_json(&url, &headers, &body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "generateContent request failed"
                );
                return Err(e);
            }
        };

        let text = parse_generate_content(&response)?;

        tracing::info!(
            model = %self.model,
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_length = text.len(),
            "generateContent request completed"
        );

        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}
