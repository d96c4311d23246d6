//! Test utilities for Twinverse model client tests.
//!
//! Provides a scripted transport and helpers for building clients over it.

use std::sync::Arc;
use twinverse_models::{GeminiClient, GeminiConfig};

pub mod scripted_transport;

#[allow(unused_imports)]
pub use scripted_transport::{Scripted, ScriptedTransport};

/// Client over a shared scripted transport with default backoff (1s doubling).
pub fn client_with(transport: &Arc<ScriptedTransport>) -> GeminiClient<Arc<ScriptedTransport>> {
    let config = GeminiConfig::builder()
        .api_key("test-key")
        .base_url("http://gemini.test/v1beta")
        .build()
        .expect("Valid config");
    GeminiClient::new(Arc::clone(transport), config)
}

/// A `generateContent` body whose first part holds `text`.
#[allow(dead_code)]
pub fn text_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    })
    .to_string()
}

/// A `predict` body carrying one base64 image.
#[allow(dead_code)]
pub fn image_body(encoded: &str) -> String {
    serde_json::json!({"predictions": [{"bytesBase64Encoded": encoded, "mimeType": "image/png"}]})
        .to_string()
}
