//! User profile and universe selection inputs.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twinverse_error::{RealityError, RealityErrorKind};

/// Personal profile the persona is derived from.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct UserProfile {
    /// Owner of the profile
    user_id: UserId,
    /// Avatar URL
    #[serde(default)]
    #[builder(default)]
    image_url: String,
    /// Free-text appearance description
    appearance: String,
    /// Date of birth as entered by the user
    date_of_birth: String,
    /// Personality keywords
    personality: String,
    /// Extra traits in the user's words
    #[serde(default)]
    #[builder(default)]
    additional_traits: String,
    /// Aesthetic or style keywords
    #[serde(default)]
    #[builder(default)]
    vibe_style: String,
    /// Self-described sexuality
    #[serde(default)]
    #[builder(default)]
    sexuality: String,
    /// Self-described gender
    #[serde(default)]
    #[builder(default)]
    gender: String,
    /// Hobbies and interests
    #[serde(default)]
    #[builder(default)]
    interests: Vec<String>,
    /// Free-text preference passed to the model
    #[serde(default)]
    #[builder(default)]
    preference: String,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    #[builder(default = "Utc::now()")]
    created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Returns a builder for constructing a UserProfile.
    pub fn builder() -> UserProfileBuilder {
        UserProfileBuilder::default()
    }

    /// Checks the minimum field lengths required before generation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), RealityError> {
        if self.appearance.trim().chars().count() < 2 {
            return Err(RealityError::new(RealityErrorKind::InvalidInput(
                "appearance must be at least 2 characters".into(),
            )));
        }
        if self.date_of_birth.trim().is_empty() {
            return Err(RealityError::new(RealityErrorKind::InvalidInput(
                "date_of_birth is required".into(),
            )));
        }
        if self.personality.trim().chars().count() < 5 {
            return Err(RealityError::new(RealityErrorKind::InvalidInput(
                "personality must be at least 5 characters".into(),
            )));
        }
        Ok(())
    }

    /// Re-assigns the profile to `user_id`.
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }
}

/// The alternate universe the user selected.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct QuantumConfig {
    /// Persona archetype, e.g. "Rogue Scholar"
    archetype: String,
    /// Flavour of universe, e.g. "Cyberpunk"
    universe_focus: String,
    /// Personality seed for the alternate self
    core_personality: String,
}

impl QuantumConfig {
    /// Creates a universe selection.
    pub fn new(
        archetype: impl Into<String>,
        universe_focus: impl Into<String>,
        core_personality: impl Into<String>,
    ) -> Self {
        Self {
            archetype: archetype.into(),
            universe_focus: universe_focus.into(),
            core_personality: core_personality.into(),
        }
    }

    /// All three fields are required and must not be blank.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput("Missing required fields")`.
    pub fn validate(&self) -> Result<(), RealityError> {
        let missing = [&self.archetype, &self.universe_focus, &self.core_personality]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing {
            return Err(RealityError::new(RealityErrorKind::InvalidInput(
                "Missing required fields".into(),
            )));
        }
        Ok(())
    }
}
