//! PostgreSQL [`ProfileStore`].

use crate::database::schema::user_profiles;
use crate::database::{DatabasePool, ProfileRow};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::instrument;
use twinverse_core::{UserId, UserProfile};
use twinverse_error::{StorageError, StorageResult};
use twinverse_interface::ProfileStore;

/// Stores profiles in the `user_profiles` table as JSONB.
#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: DatabasePool,
}

impl PgProfileStore {
    /// Create a store over `pool`.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[instrument(name = "profile_store.find", skip(self), fields(user_id = %user_id))]
    async fn find_profile(&self, user_id: &UserId) -> StorageResult<Option<UserProfile>> {
        let owner = user_id.as_str().to_string();
        let row = self
            .pool
            .interact(move |conn| {
                user_profiles::table
                    .find(owner)
                    .select(ProfileRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(StorageError::from)
            })
            .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    #[instrument(name = "profile_store.upsert", skip(self, profile), fields(user_id = %profile.user_id()))]
    async fn upsert_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        let row = ProfileRow::from_profile(profile)?;
        self.pool
            .interact(move |conn| {
                diesel::insert_into(user_profiles::table)
                    .values(&row)
                    .on_conflict(user_profiles::user_id)
                    .do_update()
                    .set((
                        user_profiles::profile.eq(excluded(user_profiles::profile)),
                        user_profiles::updated_at.eq(excluded(user_profiles::updated_at)),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)
            })
            .await?;
        Ok(())
    }
}
