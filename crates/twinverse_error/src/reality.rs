//! Errors raised by the reality generation workflow.

/// Workflow-level error conditions.
///
/// Generation failures carry the user-facing message chosen for the
/// underlying failure kind so callers can surface it directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RealityErrorKind {
    /// No authenticated caller
    #[display("Unauthorized")]
    Unauthorized,
    /// Caller may not access the requested record
    #[display("Forbidden: {}", _0)]
    Forbidden(String),
    /// Request is missing required fields or fails validation
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
    /// The caller has not created a profile yet
    #[display("User profile not found")]
    ProfileNotFound,
    /// Requested reality does not exist
    #[display("Reality not found: {}", _0)]
    NotFound(String),
    /// Generator returned a failure outcome
    #[display("Generation failed ({}): {}", kind, user_message)]
    Generation {
        /// Failure kind name reported by the generator
        kind: String,
        /// Message suitable for showing to the end user
        user_message: String,
    },
    /// Generated JSON did not match the persona schema
    #[display("AI returned invalid JSON: {}", _0)]
    InvalidPayload(String),
}

/// Reality workflow error with location tracking.
///
/// # Examples
///
/// ```
/// use twinverse_error::{RealityError, RealityErrorKind};
///
/// let err = RealityError::new(RealityErrorKind::ProfileNotFound);
/// assert!(format!("{}", err).contains("profile not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Reality Error: {} at line {} in {}", kind, line, file)]
pub struct RealityError {
    /// The kind of error that occurred
    pub kind: RealityErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RealityError {
    /// Create a new reality error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RealityErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
