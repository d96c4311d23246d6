//! Per-call request for the content generator.

use serde::{Deserialize, Serialize};

/// Attempts made when the caller does not choose a budget.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// A single text-generation request.
///
/// Immutable once built. `max_attempts` bounds the number of outbound calls
/// the generator makes and must be at least 1.
///
/// # Examples
///
/// ```
/// use twinverse_core::GenerationRequest;
///
/// let request = GenerationRequest::builder()
///     .user_prompt("describe a city")
///     .system_instruction("You are a storyteller")
///     .max_attempts(3u32)
///     .extract_json(true)
///     .build()
///     .expect("valid request");
///
/// assert_eq!(*request.max_attempts(), 3);
/// assert!(*request.extract_json());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(try_from = "RawGenerationRequest")]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GenerationRequest {
    /// Prompt text sent as the user turn
    user_prompt: String,
    /// System instruction sent alongside the prompt
    system_instruction: String,
    /// Upper bound on outbound calls, including the first
    #[builder(default = "DEFAULT_MAX_ATTEMPTS")]
    max_attempts: u32,
    /// Whether to parse an embedded JSON object out of the generated text
    #[builder(default)]
    extract_json: bool,
}

impl GenerationRequest {
    /// Creates a request with the default attempt budget and no extraction.
    pub fn new(user_prompt: impl Into<String>, system_instruction: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            system_instruction: system_instruction.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            extract_json: false,
        }
    }

    /// Returns a builder for constructing a GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }
}

impl GenerationRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.max_attempts {
            Some(0) => Err("max_attempts must be at least 1".to_string()),
            _ => Ok(()),
        }
    }
}

/// Wire form of [`GenerationRequest`]; decoding goes through the builder so
/// the same validation applies.
#[derive(Deserialize)]
struct RawGenerationRequest {
    user_prompt: String,
    system_instruction: String,
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    #[serde(default)]
    extract_json: bool,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl TryFrom<RawGenerationRequest> for GenerationRequest {
    type Error = GenerationRequestBuilderError;

    fn try_from(raw: RawGenerationRequest) -> Result<Self, Self::Error> {
        GenerationRequest::builder()
            .user_prompt(raw.user_prompt)
            .system_instruction(raw.system_instruction)
            .max_attempts(raw.max_attempts)
            .extract_json(raw.extract_json)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let request = GenerationRequest::builder()
            .user_prompt("hi")
            .system_instruction("be brief")
            .build()
            .unwrap();
        assert_eq!(*request.max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert!(!*request.extract_json());
        assert_eq!(request, GenerationRequest::new("hi", "be brief"));
    }

    #[test]
    fn zero_attempts_rejected() {
        let result = GenerationRequest::builder()
            .user_prompt("hi")
            .system_instruction("be brief")
            .max_attempts(0u32)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn decoding_rejects_zero_attempts() {
        let result: Result<GenerationRequest, _> = serde_json::from_str(
            r#"{"user_prompt":"p","system_instruction":"s","max_attempts":0,"extract_json":false}"#,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("max_attempts"), "{err}");
    }

    #[test]
    fn decoding_applies_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"user_prompt":"p","system_instruction":"s"}"#).unwrap();
        assert_eq!(request, GenerationRequest::new("p", "s"));

        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: GenerationRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn prompts_are_required() {
        let result = GenerationRequest::builder().user_prompt("hi").build();
        assert!(result.is_err());
    }
}
