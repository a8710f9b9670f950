//! REST client for the workflow engine's start webhook.
//!
//! Wraps the single outbound call the relay makes (`GET <start-url>`) using
//! [`reqwest`]. No retries; the transport's default timeout applies.

use async_trait::async_trait;
use relay_core::engine::WorkflowEngine;
use relay_core::error::EngineError;

/// HTTP client for one workflow engine start endpoint.
pub struct EngineApi {
    client: reqwest::Client,
    start_url: String,
}

/// Errors from the engine REST layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.), or the
    /// body could not be decoded.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine returned a non-2xx status code.
    #[error("Engine API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<EngineApiError> for EngineError {
    fn from(err: EngineApiError) -> Self {
        match err {
            EngineApiError::Request(e) if e.is_decode() => EngineError::Decode(e.to_string()),
            EngineApiError::Request(e) => EngineError::Request(e.to_string()),
            EngineApiError::ApiError { status, body } => EngineError::Status { status, body },
        }
    }
}

impl EngineApi {
    /// Create a new client for the given start webhook URL.
    pub fn new(start_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            start_url,
        }
    }

    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    /// Trigger a new job.
    ///
    /// Sends `GET <start-url>` with no body and returns the JSON body,
    /// expected to contain the engine-issued job identifier.
    pub async fn trigger_start(&self) -> Result<serde_json::Value, EngineApiError> {
        let response = self.client.get(&self.start_url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<serde_json::Value>().await?)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`EngineApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, EngineApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EngineApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl WorkflowEngine for EngineApi {
    async fn start_job(&self) -> Result<serde_json::Value, EngineError> {
        match self.trigger_start().await {
            Ok(body) => {
                tracing::debug!(url = %self.start_url, "Engine accepted start request");
                Ok(body)
            }
            Err(err) => {
                tracing::error!(
                    url = %self.start_url,
                    error = %err,
                    "Engine start request failed",
                );
                Err(err.into())
            }
        }
    }
}
