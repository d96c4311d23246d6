//! Resilient model clients for Twinverse.
//!
//! The [`GeminiClient`] wraps the Gemini `generateContent` endpoint in a
//! bounded exponential-backoff loop and reports every result as a
//! [`GenerationOutcome`](twinverse_core::GenerationOutcome) value. The same
//! loop drives Imagen portrait requests.
//!
//! HTTP goes through the [`GeminiTransport`] trait; [`ReqwestTransport`] is
//! the production implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod retry;

pub use gemini::*;
pub use retry::{Attempt, BackoffPolicy, Completed, Exhausted, retry_with_backoff};
