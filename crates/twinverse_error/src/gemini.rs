//! Gemini-specific error types and retry classification.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GeminiErrorKind {
    /// API key not found in configuration or environment
    #[display("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// Request never produced an HTTP response (DNS, connect, timeout)
    #[display("Gemini API request failed: {}", _0)]
    Transport(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message or response body
        message: String,
    },
    /// Response body did not match the documented envelope
    #[display("Failed to parse Gemini response: {}", _0)]
    ResponseParsing(String),
}

impl GeminiErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiErrorKind::HttpStatus { .. } => true,
            GeminiErrorKind::Transport(_) => true,
            GeminiErrorKind::ResponseParsing(_) => true,
            GeminiErrorKind::MissingApiKey | GeminiErrorKind::ClientCreation(_) => false,
        }
    }

    /// True when the service asked us to slow down (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            GeminiErrorKind::HttpStatus {
                status_code: 429,
                ..
            }
        )
    }
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use twinverse_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that participate in retry decisions.
///
/// # Examples
///
/// ```
/// use twinverse_error::{GeminiError, GeminiErrorKind, RetryableError};
///
/// let err = GeminiError::new(GeminiErrorKind::HttpStatus {
///     status_code: 429,
///     message: "Resource exhausted".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// assert!(err.is_rate_limited());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Returns true if the error is the service's rate-limit signal.
    fn is_rate_limited(&self) -> bool {
        false
    }
}

impl RetryableError for GeminiError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn is_rate_limited(&self) -> bool {
        self.kind.is_rate_limited()
    }
}
