//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls and records every request
//! it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::adapters::transport_types::{GatewayError, JsonTransport};

/// A request captured by `FakeTransport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Response body to return
    pub response_body: String,
    /// HTTP status to fail with (if set)
    pub error_status: Option<u16>,
    /// Network error message to return (if set)
    pub error_message: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Create fake transport with given response
    pub fn new(response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            error_status: None,
            error_message: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create fake transport that answers with a non-success status
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            error_status: Some(status),
            ..Self::new(body)
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            error_message: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl JsonTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, GatewayError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                body: body.to_string(),
            });
        }

        if let Some(ref msg) = self.error_message {
            return Err(GatewayError::Network(msg.clone()));
        }
        if let Some(status) = self.error_status {
            return Err(GatewayError::Http {
                status,
                body: self.response_body.clone(),
            });
        }
        Ok(self.response_body.clone())
    }
}
