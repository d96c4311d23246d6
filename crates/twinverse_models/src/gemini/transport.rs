//! Outbound HTTP capability used by the Gemini clients.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use twinverse_error::{GeminiError, GeminiErrorKind};

/// Status and body of an HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl TransportResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts a JSON body and returns the raw response.
///
/// Non-2xx statuses are returned as responses, not errors; only failures
/// that never produced a response are errors.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    /// POST `body` to `url`.
    async fn post_json(&self, url: &str, body: &JsonValue)
    -> Result<TransportResponse, GeminiError>;
}

#[async_trait]
impl<T> GeminiTransport for Arc<T>
where
    T: GeminiTransport + ?Sized,
{
    async fn post_json(
        &self,
        url: &str,
        body: &JsonValue,
    ) -> Result<TransportResponse, GeminiError> {
        (**self).post_json(url, body).await
    }
}

/// [`GeminiTransport`] backed by `reqwest`.
///
/// The API key travels in the `x-goog-api-key` header so it never shows up
/// in logged URLs.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    api_key: String,
}

impl ReqwestTransport {
    /// Builds a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` for an empty key and `ClientCreation` when the
    /// TLS backend cannot be initialized.
    pub fn new(api_key: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self { client, api_key })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl GeminiTransport for ReqwestTransport {
    #[instrument(skip(self, body), fields(url = %url))]
    async fn post_json(
        &self,
        url: &str,
        body: &JsonValue,
    ) -> Result<TransportResponse, GeminiError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::Transport(e.to_string())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::Transport(e.to_string())))?;

        debug!(status, body_len = body.len(), "Received HTTP response");
        Ok(TransportResponse { status, body })
    }
}
