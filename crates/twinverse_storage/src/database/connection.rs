//! Explicitly owned PostgreSQL connection pool.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info, instrument};
use twinverse_error::{StorageError, StorageErrorKind, StorageResult};

type PgPool = Pool<ConnectionManager<PgConnection>>;
type PgPooled = PooledConnection<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Handle to a PostgreSQL pool.
///
/// Created with [`connect`](Self::connect) and shut down with
/// [`close`](Self::close). Clones share the pool; once closed, every clone
/// reports [`StorageErrorKind::Closed`].
#[derive(Clone)]
pub struct DatabasePool {
    inner: Arc<RwLock<Option<PgPool>>>,
}

impl DatabasePool {
    /// Create a pool for `database_url` holding at most `max_size` connections.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the pool cannot open its first
    /// connection.
    #[instrument(name = "database.connect", skip(database_url))]
    pub fn connect(database_url: &str, max_size: u32) -> StorageResult<Self> {
        debug!("Creating PostgreSQL connection pool");
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size.max(1))
            .build(manager)
            .map_err(|e| {
                error!(error = %e, "Failed to create connection pool");
                StorageError::new(StorageErrorKind::Connection(e.to_string()))
            })?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Some(pool))),
        })
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns a migration error if any migration fails.
    #[instrument(name = "database.migrate", skip(self))]
    pub fn run_migrations(&self) -> StorageResult<()> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(StorageErrorKind::Migration(e.to_string())))?;
        info!(count = applied.len(), "Applied pending migrations");
        Ok(())
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns `Closed` after [`close`](Self::close) and a connection error
    /// when the pool is exhausted or the server is unreachable.
    pub fn connection(&self) -> StorageResult<PgPooled> {
        let guard = self.inner.read().map_err(|_| {
            StorageError::new(StorageErrorKind::Connection("pool lock poisoned".into()))
        })?;
        let pool = guard
            .as_ref()
            .ok_or_else(|| StorageError::new(StorageErrorKind::Closed))?;
        pool.get().map_err(|e| {
            error!(error = %e, "Failed to check out connection");
            StorageError::new(StorageErrorKind::Connection(e.to_string()))
        })
    }

    /// Run blocking diesel work on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Propagates errors from `work` and from connection checkout.
    pub async fn interact<F, R>(&self, work: F) -> StorageResult<R>
    where
        F: FnOnce(&mut PgConnection) -> StorageResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let pool = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.connection()?;
            work(&mut conn)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Query(e.to_string())))?
    }

    /// Drop the pool. Connections already checked out finish normally.
    pub fn close(&self) {
        match self.inner.write() {
            Ok(mut guard) => {
                if guard.take().is_some() {
                    info!("Closed PostgreSQL connection pool");
                }
            }
            Err(_) => error!("Pool lock poisoned while closing"),
        }
    }

    /// True after [`close`](Self::close).
    pub fn is_closed(&self) -> bool {
        self.inner.read().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("closed", &self.is_closed())
            .finish()
    }
}
