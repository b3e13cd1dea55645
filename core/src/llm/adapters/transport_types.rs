//! Transport types
//!
//! Common types shared across transport implementations.

use async_trait::async_trait;

/// Gateway errors
///
/// One attempt per call; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Credential absent or empty; raised before any request is built
    #[error("Missing API credential for provider '{provider}'")]
    MissingCredential { provider: String },

    /// Network error (connection refused, DNS, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Body could not be decoded or carried no candidate text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The request URL carries the API key, so it is stripped before the error
/// is rendered.
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        match err.status() {
            Some(status) => GatewayError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => GatewayError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::InvalidResponse(err.to_string())
    }
}

/// Asynchronous JSON-over-HTTP transport
///
/// Abstraction over the HTTP client so adapters can be tested with
/// `FakeTransport`.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// POST a JSON body and return the response body
    ///
    /// Non-success statuses come back as `GatewayError::Http` with the
    /// response body attached.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GatewayError>;
}
