//! Content generator trait.

use async_trait::async_trait;
use twinverse_core::{GenerationOutcome, GenerationRequest};

/// A text-generation backend that reports every result as a value.
///
/// Implementations own their retry policy. `generate` never panics on
/// service errors and never returns more attempts than the request allows.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Run one generation request to completion.
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome;

    /// Model identifier used for logging.
    fn model_name(&self) -> &str;
}
