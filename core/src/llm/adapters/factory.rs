//! Adapter Factory
//!
//! Creates LLM adapter instances from configuration.

use crate::config::{AuditorConfig, Provider};
use crate::llm::adapters::gemini::GeminiAdapter;
use crate::llm::adapters::stub::StubAdapter;
use crate::llm::adapters::Adapter;

/// Create adapter from configuration
///
/// Never fails on a missing credential: the Gemini adapter reports that per
/// call so the server can still start and answer with an error envelope.
pub fn create_adapter(config: &AuditorConfig) -> Adapter {
    match config.llm.provider {
        Provider::Gemini => {
            if config.api_key().is_none() {
                tracing::warn!("No API key configured; model calls will fail until one is set");
            }
            Adapter::Gemini(GeminiAdapter::new(
                config.llm.base_url.clone(),
                config.llm.model.clone(),
                config.api_key().map(str::to_string),
            ))
        }
        Provider::Stub => Adapter::Stub(StubAdapter::new()),
    }
}
