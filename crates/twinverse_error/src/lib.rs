//! Error types for the Twinverse workspace.
//!
//! Every error carries the source location where it was created. Crate-specific
//! errors convert into [`TwinverseError`] through [`TwinverseErrorKind`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod json;
mod reality;
mod storage;

pub use config::ConfigError;
pub use error::{TwinverseError, TwinverseErrorKind, TwinverseResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use json::{JsonError, JsonErrorKind};
pub use reality::{RealityError, RealityErrorKind};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
