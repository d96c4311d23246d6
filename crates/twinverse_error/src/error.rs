//! Workspace-level error aggregate.

use crate::{ConfigError, GeminiError, JsonError, RealityError, StorageError};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum TwinverseErrorKind {
    /// JSON extraction or parsing error
    #[display("{}", _0)]
    Json(JsonError),
    /// Gemini client error
    #[display("{}", _0)]
    Gemini(GeminiError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Storage error
    #[display("{}", _0)]
    Storage(StorageError),
    /// Reality workflow error
    #[display("{}", _0)]
    Reality(RealityError),
}

/// Twinverse error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("Twinverse Error: {}", _0)]
pub struct TwinverseError(Box<TwinverseErrorKind>);

impl TwinverseError {
    /// Create a new error from a kind.
    pub fn new(kind: TwinverseErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TwinverseErrorKind {
        &self.0
    }
}

impl std::error::Error for TwinverseError {}

// Generic From implementation for any type that converts to TwinverseErrorKind
impl<T> From<T> for TwinverseError
where
    T: Into<TwinverseErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Twinverse operations.
pub type TwinverseResult<T> = std::result::Result<T, TwinverseError>;
