//! LLM Adapters
//!
//! Provider-agnostic interface for the generative text endpoint.
//! Supports Gemini and an offline stub.

pub mod factory;
pub mod gemini;
pub mod gemini_parse;
pub mod stub;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

use async_trait::async_trait;

// Re-export common types
pub use factory::create_adapter;
pub use transport::{GatewayError, JsonTransport, Transport};

/// LLM adapter trait
///
/// All providers implement this trait. One call, one attempt.
#[async_trait]
pub trait LlmAdapter: Send + Sync {
    /// Generate a completion from a prompt and return the full text
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Get provider name for logging
    fn provider_name(&self) -> &str;
}

/// Concrete adapter over every provider
#[derive(Debug)]
pub enum Adapter {
    Gemini(gemini::GeminiAdapter),
    Stub(stub::StubAdapter),
}

#[async_trait]
impl LlmAdapter for Adapter {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        match self {
            Adapter::Gemini(a) => a.generate(prompt).await,
            Adapter::Stub(a) => a.generate(prompt).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Adapter::Gemini(a) => a.provider_name(),
            Adapter::Stub(a) => a.provider_name(),
        }
    }
}
