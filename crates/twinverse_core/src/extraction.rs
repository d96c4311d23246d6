//! Recovery of a JSON object embedded in free-form model text.
//!
//! The span runs greedily from the first `{` to the last `}`. Text holding
//! more than one JSON block therefore usually yields an invalid span.

use serde_json::Value as JsonValue;
use twinverse_error::{JsonError, JsonErrorKind};

/// Returns the slice from the first `{` to the last `}` inclusive.
///
/// # Examples
///
/// ```
/// use twinverse_core::json_span;
///
/// assert_eq!(json_span("A city. {\"a\":1} The end."), Some("{\"a\":1}"));
/// assert_eq!(json_span("no braces"), None);
/// ```
pub fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extracts and parses the embedded JSON object.
///
/// # Errors
///
/// Returns [`JsonErrorKind::NoObject`] when no span exists and
/// [`JsonErrorKind::Invalid`] when the span does not parse.
pub fn extract_json_object(text: &str) -> Result<JsonValue, JsonError> {
    let span = json_span(text).ok_or_else(|| JsonError::new(JsonErrorKind::NoObject))?;
    serde_json::from_str(span).map_err(|e| JsonError::new(JsonErrorKind::Invalid(e.to_string())))
}
