//! Persistence collaborator traits.

use async_trait::async_trait;
use twinverse_core::{ChatEntry, DoppelgangerProfile, RealityId, RealityRecord, UserId, UserProfile};
use twinverse_error::StorageResult;

/// Stores generated personas.
#[async_trait]
pub trait RealityStore: Send + Sync {
    /// Persist a persona for `user_id` and return the new record identifier.
    async fn save_reality(
        &self,
        user_id: &UserId,
        profile: &DoppelgangerProfile,
    ) -> StorageResult<RealityId>;

    /// Fetch a single record.
    async fn get_reality(&self, id: &RealityId) -> StorageResult<Option<RealityRecord>>;

    /// Records owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> StorageResult<Vec<RealityRecord>>;

    /// Every record, newest first.
    async fn list_all(&self) -> StorageResult<Vec<RealityRecord>>;

    /// Append turns to a record's chat log.
    ///
    /// Fails with `NotFound` when the record does not exist.
    async fn append_chat(&self, id: &RealityId, entries: &[ChatEntry]) -> StorageResult<()>;
}

/// Stores the personal profiles personas are generated from.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile of `user_id`, if one was saved.
    async fn find_profile(&self, user_id: &UserId) -> StorageResult<Option<UserProfile>>;

    /// Insert or replace the profile keyed by its user id.
    async fn upsert_profile(&self, profile: &UserProfile) -> StorageResult<()>;
}
