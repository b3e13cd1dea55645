//! Real HTTP transport using reqwest
//!
//! No timeout is configured on the client; a hung upstream keeps the caller
//! waiting.

use async_trait::async_trait;
use reqwest::Client;

use crate::llm::adapters::transport_types::{GatewayError, JsonTransport};

/// Real HTTP transport using reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl JsonTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GatewayError> {
        let mut request = self.client.post(url).body(body.to_string());

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {}>", e.without_url()),
            };
            tracing::warn!(status = status.as_u16(), "Model endpoint returned error status");
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
