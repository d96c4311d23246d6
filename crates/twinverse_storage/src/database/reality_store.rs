//! PostgreSQL [`RealityStore`].

use crate::database::schema::reality_results;
use crate::database::{DatabasePool, NewRealityRow, RealityRow};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tracing::{debug, instrument};
use twinverse_core::{ChatEntry, DoppelgangerProfile, RealityId, RealityRecord, UserId};
use twinverse_error::{StorageError, StorageErrorKind, StorageResult};
use twinverse_interface::RealityStore;

/// Stores realities in the `reality_results` table.
#[derive(Debug, Clone)]
pub struct PgRealityStore {
    pool: DatabasePool,
}

impl PgRealityStore {
    /// Create a store over `pool`.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RealityStore for PgRealityStore {
    #[instrument(name = "reality_store.save", skip(self, profile), fields(user_id = %user_id))]
    async fn save_reality(
        &self,
        user_id: &UserId,
        profile: &DoppelgangerProfile,
    ) -> StorageResult<RealityId> {
        let row = NewRealityRow {
            id: *RealityId::new_v4().as_uuid(),
            user_id: user_id.as_str().to_string(),
            generated_profile: serde_json::to_value(profile).map_err(|e| {
                StorageError::new(StorageErrorKind::Serialization(e.to_string()))
            })?,
            created_at: Utc::now(),
        };

        let id = self
            .pool
            .interact(move |conn| {
                diesel::insert_into(reality_results::table)
                    .values(&row)
                    .returning(reality_results::id)
                    .get_result::<uuid::Uuid>(conn)
                    .map_err(StorageError::from)
            })
            .await?;

        debug!(reality_id = %id, "Stored reality");
        Ok(id.into())
    }

    #[instrument(name = "reality_store.get", skip(self), fields(reality_id = %id))]
    async fn get_reality(&self, id: &RealityId) -> StorageResult<Option<RealityRecord>> {
        let uuid = *id.as_uuid();
        let row = self
            .pool
            .interact(move |conn| {
                reality_results::table
                    .find(uuid)
                    .select(RealityRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(StorageError::from)
            })
            .await?;

        row.map(RealityRow::into_record).transpose()
    }

    #[instrument(name = "reality_store.list_for_user", skip(self), fields(user_id = %user_id))]
    async fn list_for_user(&self, user_id: &UserId) -> StorageResult<Vec<RealityRecord>> {
        let owner = user_id.as_str().to_string();
        let rows = self
            .pool
            .interact(move |conn| {
                reality_results::table
                    .filter(reality_results::user_id.eq(owner))
                    .order(reality_results::created_at.desc())
                    .select(RealityRow::as_select())
                    .load(conn)
                    .map_err(StorageError::from)
            })
            .await?;

        rows.into_iter().map(RealityRow::into_record).collect()
    }

    #[instrument(name = "reality_store.list_all", skip(self))]
    async fn list_all(&self) -> StorageResult<Vec<RealityRecord>> {
        let rows = self
            .pool
            .interact(|conn| {
                reality_results::table
                    .order(reality_results::created_at.desc())
                    .select(RealityRow::as_select())
                    .load(conn)
                    .map_err(StorageError::from)
            })
            .await?;

        rows.into_iter().map(RealityRow::into_record).collect()
    }

    #[instrument(name = "reality_store.append_chat", skip(self, entries), fields(reality_id = %id, turns = entries.len()))]
    async fn append_chat(&self, id: &RealityId, entries: &[ChatEntry]) -> StorageResult<()> {
        let uuid = *id.as_uuid();
        let additions = entries.to_vec();
        let missing = id.to_string();

        self.pool
            .interact(move |conn| {
                conn.transaction::<_, StorageError, _>(|conn| {
                    let current = reality_results::table
                        .find(uuid)
                        .select(reality_results::chat_log)
                        .for_update()
                        .first::<serde_json::Value>(conn)
                        .optional()?
                        .ok_or_else(|| {
                            StorageError::new(StorageErrorKind::NotFound(format!(
                                "reality {}",
                                missing
                            )))
                        })?;

                    let mut log: Vec<ChatEntry> = serde_json::from_value(current).map_err(|e| {
                        StorageError::new(StorageErrorKind::Serialization(e.to_string()))
                    })?;
                    log.extend(additions);
                    let log = serde_json::to_value(&log).map_err(|e| {
                        StorageError::new(StorageErrorKind::Serialization(e.to_string()))
                    })?;

                    diesel::update(reality_results::table.find(uuid))
                        .set(reality_results::chat_log.eq(log))
                        .execute(conn)?;
                    Ok(())
                })
            })
            .await?;

        debug!("Appended chat turns");
        Ok(())
    }
}
