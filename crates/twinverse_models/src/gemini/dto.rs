//! Wire shapes for the Gemini `generateContent` and Imagen `predict` calls.
//!
//! Response fields are optional so a missing field becomes a representable
//! state instead of a deserialization failure.

use serde::{Deserialize, Serialize};

/// A single text part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    /// Text content
    pub text: String,
}

/// A list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Ordered parts
    pub parts: Vec<Part>,
}

impl Content {
    /// Content holding one text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Empty marker object enabling Google Search grounding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoogleSearch {}

/// A tool declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    /// Search grounding tool
    pub google_search: GoogleSearch,
}

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// User turn
    pub contents: Vec<Content>,
    /// System instruction
    pub system_instruction: Content,
    /// Optional tools; omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    /// Request carrying one user prompt and a system instruction.
    pub fn new(
        user_prompt: impl Into<String>,
        system_instruction: impl Into<String>,
        search_grounding: bool,
    ) -> Self {
        let tools = if search_grounding {
            vec![Tool {
                google_search: GoogleSearch::default(),
            }]
        } else {
            Vec::new()
        };

        Self {
            contents: vec![Content::text(user_prompt)],
            system_instruction: Content::text(system_instruction),
            tools,
        }
    }
}

/// A text part in a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponsePart {
    /// Generated text
    #[serde(default)]
    pub text: Option<String>,
}

/// Content of a response candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CandidateContent {
    /// Generated parts
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// One response candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Body of a `generateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateContentResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, when present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

/// Imagen instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictInstance {
    /// Image prompt
    pub prompt: String,
}

/// Imagen sampling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Number of images to render
    pub sample_count: u32,
}

/// Body of an Imagen `predict` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    /// The single instance to render
    pub instances: PredictInstance,
    /// Sampling parameters
    pub parameters: PredictParameters,
}

impl PredictRequest {
    /// Request for one image.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self {
            instances: PredictInstance {
                prompt: prompt.into(),
            },
            parameters: PredictParameters { sample_count: 1 },
        }
    }
}

/// One Imagen prediction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// PNG bytes, base64 encoded
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
}

/// Body of an Imagen `predict` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PredictResponse {
    /// Predictions
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

impl PredictResponse {
    /// `predictions[0].bytesBase64Encoded`, when present and non-empty.
    pub fn first_image(&self) -> Option<&str> {
        self.predictions
            .first()?
            .bytes_base64_encoded
            .as_deref()
            .filter(|data| !data.is_empty())
    }
}
