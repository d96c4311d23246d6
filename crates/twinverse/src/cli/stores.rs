//! Store selection for the binary.

use std::sync::Arc;
use twinverse::AppConfig;
use twinverse_interface::{ProfileStore, RealityStore};
use twinverse_storage::{InMemoryProfileStore, InMemoryRealityStore};

/// Reality and profile stores chosen from configuration.
pub struct Stores {
    pub realities: Arc<dyn RealityStore>,
    pub profiles: Arc<dyn ProfileStore>,
    #[cfg(feature = "database")]
    pool: Option<twinverse_storage::DatabasePool>,
}

impl Stores {
    /// PostgreSQL stores when a database URL is configured, memory otherwise.
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "database")]
        if let Some(url) = config.database().url().clone() {
            use twinverse_storage::{DatabasePool, PgProfileStore, PgRealityStore};

            let max = *config.database().max_connections();
            let pool = tokio::task::spawn_blocking(move || {
                let pool = DatabasePool::connect(&url, max)?;
                pool.run_migrations()?;
                Ok::<_, twinverse_error::StorageError>(pool)
            })
            .await??;

            return Ok(Self {
                realities: Arc::new(PgRealityStore::new(pool.clone())),
                profiles: Arc::new(PgProfileStore::new(pool.clone())),
                pool: Some(pool),
            });
        }

        #[cfg(not(feature = "database"))]
        if config.database().url().is_some() {
            tracing::warn!("database.url is set but this build lacks the database feature");
        }

        tracing::warn!("Using in-memory stores; nothing outlives this process");
        Ok(Self {
            realities: Arc::new(InMemoryRealityStore::new()),
            profiles: Arc::new(InMemoryProfileStore::new()),
            #[cfg(feature = "database")]
            pool: None,
        })
    }

    /// Release the database pool, if any.
    pub fn close(&self) {
        #[cfg(feature = "database")]
        if let Some(pool) = &self.pool {
            pool.close();
        }
    }
}
