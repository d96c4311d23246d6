//! Stored persona records.

use crate::{ChatEntry, DoppelgangerProfile, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned by the persistence collaborator.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct RealityId(Uuid);

impl RealityId {
    /// Generates a fresh random identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::str::FromStr for RealityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A generated persona as stored for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RealityRecord {
    id: RealityId,
    user_id: UserId,
    generated_profile: DoppelgangerProfile,
    created_at: DateTime<Utc>,
    /// Chat with the persona, oldest turn first
    #[serde(default)]
    chat_log: Vec<ChatEntry>,
}

impl RealityRecord {
    /// Assembles a record.
    pub fn new(
        id: RealityId,
        user_id: UserId,
        generated_profile: DoppelgangerProfile,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            generated_profile,
            created_at,
            chat_log: Vec::new(),
        }
    }

    /// Replaces the chat log.
    pub fn with_chat_log(mut self, chat_log: Vec<ChatEntry>) -> Self {
        self.chat_log = chat_log;
        self
    }

    /// Appends turns to the chat log.
    pub fn push_chat(&mut self, entries: &[ChatEntry]) {
        self.chat_log.extend_from_slice(entries);
    }
}
