//! Gemini connection settings.

use crate::BackoffPolicy;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use twinverse_core::DEFAULT_MAX_ATTEMPTS;

/// Default text model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
/// Default image model.
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-3.0-generate-001";
/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the Gemini text and Imagen clients.
///
/// Loaded once at startup and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use twinverse_models::GeminiConfig;
///
/// let config = GeminiConfig::builder()
///     .api_key("test-key")
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.model(), "gemini-2.0-flash");
/// assert_eq!(
///     config.generate_content_url(),
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key sent with every request
    #[serde(default)]
    api_key: String,
    /// Text model identifier
    #[serde(default = "default_model")]
    #[builder(default = "default_model()")]
    model: String,
    /// Image model identifier
    #[serde(default = "default_image_model")]
    #[builder(default = "default_image_model()")]
    image_model: String,
    /// API root, without a trailing slash
    #[serde(default = "default_base_url")]
    #[builder(default = "default_base_url()")]
    base_url: String,
    /// Attach the Google Search grounding tool to text requests
    #[serde(default = "default_search_grounding")]
    #[builder(default = "default_search_grounding()")]
    search_grounding: bool,
    /// Attempt budget used when callers do not pick one
    #[serde(default = "default_max_attempts")]
    #[builder(default = "default_max_attempts()")]
    max_attempts: u32,
    /// Wait after the first failed attempt, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    #[builder(default = "default_initial_backoff_ms()")]
    initial_backoff_ms: u64,
    /// Per-request HTTP timeout in seconds; 0 disables it
    #[serde(default = "default_request_timeout_secs")]
    #[builder(default = "default_request_timeout_secs()")]
    request_timeout_secs: u64,
}

impl GeminiConfig {
    /// Returns a builder for constructing a GeminiConfig.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Endpoint for text generation.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Endpoint for image generation.
    pub fn predict_url(&self) -> String {
        format!(
            "{}/models/{}:predict",
            self.base_url.trim_end_matches('/'),
            self.image_model
        )
    }

    /// Backoff derived from `initial_backoff_ms`, doubling each retry.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(Duration::from_millis(self.initial_backoff_ms), 2)
    }

    /// HTTP timeout, if enabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .field("search_grounding", &self.search_grounding)
            .field("max_attempts", &self.max_attempts)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGEN_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_search_grounding() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    60
}
