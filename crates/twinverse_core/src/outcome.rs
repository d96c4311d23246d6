//! Result values reported by the content generator.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Why a generation attempt run ended without a usable result.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// Every attempt was answered with HTTP 429
    RateLimited,
    /// Non-429 HTTP error or network failure on the last attempt
    TransportError,
    /// The service answered but produced no text
    EmptyResponse,
    /// Text was produced but the embedded JSON could not be extracted
    MalformedPayload,
}

impl FailureKind {
    /// True for kinds that the generator retries before giving up.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::RateLimited | FailureKind::TransportError)
    }

    /// Message suitable for showing to an end user.
    ///
    /// # Examples
    ///
    /// ```
    /// use twinverse_core::FailureKind;
    ///
    /// assert!(FailureKind::RateLimited.user_message().contains("try again"));
    /// ```
    pub fn user_message(&self) -> &'static str {
        if self.is_retryable() {
            "The generation service is busy, please try again in a moment."
        } else {
            "Content generation failed, please adjust your input and retry."
        }
    }
}

/// Outcome of one `generate` invocation.
///
/// Never persisted by the generator; the caller decides what to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Text was produced (and, if requested, JSON was extracted)
    Success {
        /// Generated text exactly as returned by the service
        raw_text: String,
        /// Parsed object when extraction was requested
        extracted_object: Option<JsonValue>,
    },
    /// No usable result
    Failure {
        /// Failure classification
        kind: FailureKind,
        /// Number of outbound calls made, never above the request budget
        attempts: u32,
        /// Generated text kept for diagnostics on `MalformedPayload`
        raw_text: Option<String>,
    },
}

impl GenerationOutcome {
    /// Creates a failure without diagnostic text.
    pub fn failure(kind: FailureKind, attempts: u32) -> Self {
        GenerationOutcome::Failure {
            kind,
            attempts,
            raw_text: None,
        }
    }

    /// True for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }

    /// Failure kind, if this outcome is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            GenerationOutcome::Failure { kind, .. } => Some(*kind),
            GenerationOutcome::Success { .. } => None,
        }
    }

    /// Generated text, present on success and on malformed payloads.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Success { raw_text, .. } => Some(raw_text),
            GenerationOutcome::Failure { raw_text, .. } => raw_text.as_deref(),
        }
    }

    /// Extracted JSON object, if any.
    pub fn extracted_object(&self) -> Option<&JsonValue> {
        match self {
            GenerationOutcome::Success {
                extracted_object, ..
            } => extracted_object.as_ref(),
            GenerationOutcome::Failure { .. } => None,
        }
    }
}
