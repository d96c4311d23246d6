//! Diesel row types.

use crate::database::schema::{reality_results, user_profiles};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use twinverse_core::{ChatEntry, DoppelgangerProfile, RealityRecord, UserId, UserProfile};
use twinverse_error::{StorageError, StorageErrorKind, StorageResult};
use uuid::Uuid;

/// Database row for the reality_results table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, derive_getters::Getters)]
#[diesel(table_name = reality_results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RealityRow {
    id: Uuid,
    user_id: String,
    generated_profile: JsonValue,
    created_at: DateTime<Utc>,
    chat_log: JsonValue,
}

impl RealityRow {
    /// Decode the stored payload into a record.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload no longer matches
    /// [`DoppelgangerProfile`].
    pub fn into_record(self) -> StorageResult<RealityRecord> {
        let profile: DoppelgangerProfile = serde_json::from_value(self.generated_profile)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        let chat_log: Vec<ChatEntry> = serde_json::from_value(self.chat_log)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        Ok(RealityRecord::new(
            self.id.into(),
            UserId::new(self.user_id),
            profile,
            self.created_at,
        )
        .with_chat_log(chat_log))
    }
}

/// Insertable reality row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reality_results)]
pub struct NewRealityRow {
    /// Reality identifier
    pub id: Uuid,
    /// Owner
    pub user_id: String,
    /// Persona as JSONB
    pub generated_profile: JsonValue,
    /// Insert time
    pub created_at: DateTime<Utc>,
}

/// Database row for the user_profiles table; the profile is stored as JSONB.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Owner, one row per user
    pub user_id: String,
    /// Full profile as JSONB
    pub profile: JsonValue,
    /// Last upsert time
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// Encode a profile for storage.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the profile cannot be encoded.
    pub fn from_profile(profile: &UserProfile) -> StorageResult<Self> {
        let json = serde_json::to_value(profile)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        Ok(Self {
            user_id: profile.user_id().as_str().to_string(),
            profile: json,
            updated_at: Utc::now(),
        })
    }

    /// Decode the stored profile.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload does not decode.
    pub fn into_profile(self) -> StorageResult<UserProfile> {
        serde_json::from_value(self.profile)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))
    }
}
