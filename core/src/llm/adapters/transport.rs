//! HTTP Transport for LLM Adapters
//!
//! Asynchronous JSON transport with a fixture-backed fake for tests.

use std::sync::Arc;

use async_trait::async_trait;

pub use crate::llm::adapters::transport_fake::{FakeTransport, RecordedRequest};
pub use crate::llm::adapters::transport_reqwest::ReqwestTransport;
pub use crate::llm::adapters::transport_types::{GatewayError, JsonTransport};

/// Concrete transport enum
///
/// The fake is shared through an `Arc` so tests keep a handle to inspect
/// the recorded requests after handing the transport to an adapter.
#[derive(Debug, Clone)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(Arc<FakeTransport>),
}

impl Transport {
    pub fn fake(fake: Arc<FakeTransport>) -> Self {
        Transport::Fake(fake)
    }
}

#[async_trait]
impl JsonTransport for Transport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GatewayError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body).await,
            Transport::Fake(t) => t.post_json(url, headers, body).await,
        }
    }
}
