//! JSON extraction and parsing error types.

/// Why a JSON payload could not be recovered from model text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// No `{ ... }` span exists in the text
    #[display("No JSON object found in text")]
    NoObject,
    /// A span was found but is not valid JSON
    #[display("Invalid JSON: {}", _0)]
    Invalid(String),
    /// Valid JSON that does not match the expected schema
    #[display("JSON does not match schema: {}", _0)]
    Schema(String),
}

/// JSON error with source location.
///
/// # Examples
///
/// ```
/// use twinverse_error::{JsonError, JsonErrorKind};
///
/// let err = JsonError::new(JsonErrorKind::NoObject);
/// assert!(format!("{}", err).contains("No JSON object"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    /// The kind of error that occurred
    pub kind: JsonErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the current location.
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
