//! Google Gemini text and Imagen image clients.

mod client;
mod config;
mod dto;
mod imagen;
mod transport;

pub use client::GeminiClient;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_IMAGEN_MODEL, GeminiConfig,
    GeminiConfigBuilder, GeminiConfigBuilderError,
};
pub use dto::{
    Candidate, CandidateContent, Content, GenerateContentRequest, GenerateContentResponse,
    GoogleSearch, Part, PredictInstance, PredictParameters, PredictRequest, PredictResponse,
    Prediction, ResponsePart, Tool,
};
pub use imagen::{PLACEHOLDER_PORTRAIT_URL, PortraitOutcome};
pub use transport::{GeminiTransport, ReqwestTransport, TransportResponse};
