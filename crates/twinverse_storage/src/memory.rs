//! HashMap-backed stores for tests and local runs.
//!
//! All data is lost when the last handle is dropped.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use twinverse_core::{ChatEntry, DoppelgangerProfile, RealityId, RealityRecord, UserId, UserProfile};
use twinverse_error::{StorageError, StorageErrorKind, StorageResult};
use twinverse_interface::{ProfileStore, RealityStore};

/// In-memory [`RealityStore`].
///
/// Clones share the same underlying map.
///
/// # Example
/// ```no_run
/// use twinverse_interface::RealityStore;
/// use twinverse_storage::InMemoryRealityStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryRealityStore::new();
///     let records = store.list_all().await.expect("in-memory listing");
///     assert!(records.is_empty());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRealityStore {
    records: Arc<RwLock<HashMap<RealityId, RealityRecord>>>,
}

impl InMemoryRealityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Insert a fully formed record, replacing any with the same id.
    pub async fn insert(&self, record: RealityRecord) {
        self.records.write().await.insert(*record.id(), record);
    }

    async fn sorted<F>(&self, keep: F) -> Vec<RealityRecord>
    where
        F: Fn(&RealityRecord) -> bool,
    {
        let records = self.records.read().await;
        let mut matching: Vec<RealityRecord> =
            records.values().filter(|r| keep(r)).cloned().collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        matching
    }
}

#[async_trait]
impl RealityStore for InMemoryRealityStore {
    async fn save_reality(
        &self,
        user_id: &UserId,
        profile: &DoppelgangerProfile,
    ) -> StorageResult<RealityId> {
        let id = RealityId::new_v4();
        let record = RealityRecord::new(id, user_id.clone(), profile.clone(), Utc::now());
        self.records.write().await.insert(id, record);
        debug!(reality_id = %id, user_id = %user_id, "Stored reality in memory");
        Ok(id)
    }

    async fn get_reality(&self, id: &RealityId) -> StorageResult<Option<RealityRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> StorageResult<Vec<RealityRecord>> {
        Ok(self.sorted(|r| r.user_id() == user_id).await)
    }

    async fn list_all(&self) -> StorageResult<Vec<RealityRecord>> {
        Ok(self.sorted(|_| true).await)
    }

    async fn append_chat(&self, id: &RealityId, entries: &[ChatEntry]) -> StorageResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id).ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(format!("reality {}", id)))
        })?;
        record.push_chat(entries);
        debug!(reality_id = %id, turns = record.chat_log().len(), "Appended chat in memory");
        Ok(())
    }
}

/// In-memory [`ProfileStore`], keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_profile(&self, user_id: &UserId) -> StorageResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }
}
