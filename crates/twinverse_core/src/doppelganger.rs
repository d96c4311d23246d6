//! Typed schema for the generated alternate-universe persona.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use twinverse_error::{JsonError, JsonErrorKind};

/// Allies and adversaries of the alternate self.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsAndRivals {
    /// Named friends
    pub friends: Vec<String>,
    /// Named rivals
    pub rivals: Vec<String>,
}

/// The persona object the model is instructed to emit.
///
/// Field names match the JSON keys requested in the system instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoppelgangerProfile {
    /// Date of birth in the alternate universe
    pub alternate_universe_dob: String,
    /// One detailed paragraph
    pub backstory: String,
    /// Personality traits
    pub personality_traits: Vec<String>,
    /// "latitude, longitude"
    pub location_coordinates: String,
    /// One paragraph
    pub daily_routine: String,
    /// Notable achievements
    pub major_achievements: Vec<String>,
    /// Strengths
    pub strengths: Vec<String>,
    /// Weaknesses
    pub weaknesses: Vec<String>,
    /// Friends and rivals
    pub friends_and_rivals: FriendsAndRivals,
    /// Secrets and quirks
    pub secrets_and_quirks: Vec<String>,
    /// Favorite quotes
    pub favorite_quotes: Vec<String>,
}

impl DoppelgangerProfile {
    /// Validates an extracted JSON object against the persona schema.
    ///
    /// # Errors
    ///
    /// Returns [`JsonErrorKind::Schema`] naming the missing or mistyped field.
    pub fn from_value(value: JsonValue) -> Result<Self, JsonError> {
        serde_json::from_value(value)
            .map_err(|e| JsonError::new(JsonErrorKind::Schema(e.to_string())))
    }
}
