//! Conversation turns with a generated persona.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who spoke a chat turn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChatRole {
    /// The signed-in user
    User,
    /// The persona, answered by the generator
    Model,
}

/// One turn of a persona chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ChatEntry {
    /// Speaker
    role: ChatRole,
    /// Message text
    text: String,
    /// When the turn was recorded
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl ChatEntry {
    /// A turn stamped with the current time.
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// A user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    /// A persona turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }
}
