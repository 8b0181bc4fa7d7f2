pub mod fault;
pub mod guard;
pub mod models;
pub mod operations;
pub mod schema;

use std::time::Duration;

use anyhow::Result;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use crate::db::fault::Fault;
use crate::db::guard::{require_found, translate_faults, with_rollback};
use crate::error::ApiError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_size: u32,
    pub connection_timeout: Duration,
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

/// Applied to every connection as it leaves the pool.
#[derive(Debug)]
struct ConnectionPragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pooled SQLite handle. Cloning is cheap and shares the pool.
///
/// Each call to [`Database::read`], [`Database::lookup`] or [`Database::write`]
/// is one unit of work: a single connection is checked out, used, and returned
/// to the pool when the call ends, whatever the outcome.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Builds the pool and waits until its idle connections are open.
    pub fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, Fault> {
        let pool = Self::builder(settings).build(ConnectionManager::new(database_url))?;
        info!(
            "Opened database {} with a pool of {} connections",
            database_url, settings.max_size
        );
        Ok(Self { pool })
    }

    /// Builds the pool without opening any connection. Connectivity problems
    /// surface on the first checkout instead.
    pub fn connect_lazy(database_url: &str, settings: &PoolSettings) -> Self {
        let pool = Self::builder(settings).build_unchecked(ConnectionManager::new(database_url));
        Self { pool }
    }

    fn builder(settings: &PoolSettings) -> diesel::r2d2::Builder<ConnectionManager<SqliteConnection>> {
        Pool::builder()
            .max_size(settings.max_size)
            .connection_timeout(settings.connection_timeout)
            .connection_customizer(Box::new(ConnectionPragmas {
                busy_timeout: settings.busy_timeout,
            }))
    }

    pub fn run_migrations(&self) -> Result<usize> {
        let mut conn = self.pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to apply migrations: {}", e))?;

        if applied.is_empty() {
            debug!("Database schema already up to date");
        }
        for migration in &applied {
            info!("Migration {} applied successfully", migration);
        }
        Ok(applied.len())
    }

    fn checkout(&self) -> Result<DbConnection, Fault> {
        Ok(self.pool.get()?)
    }

    pub fn ping(&self) -> bool {
        self.checkout()
            .and_then(|mut conn| {
                diesel::sql_query("SELECT 1")
                    .execute(&mut *conn)
                    .map_err(Fault::from)
            })
            .is_ok()
    }

    /// Read-only statement. Nothing is committed.
    pub fn read<T>(
        &self,
        operation: &str,
        op: impl FnOnce(&mut SqliteConnection) -> QueryResult<T>,
    ) -> Result<T, ApiError> {
        translate_faults(operation, || {
            let mut conn = self.checkout()?;
            op(&mut *conn).map_err(Fault::from)
        })
    }

    /// Single-row lookup where an absent row is reported as `resource` not found.
    pub fn lookup<T>(
        &self,
        operation: &str,
        resource: &'static str,
        op: impl FnOnce(&mut SqliteConnection) -> QueryResult<Option<T>>,
    ) -> Result<T, ApiError> {
        let row = self.read(operation, op)?;
        require_found(resource, row)
    }

    /// Mutating statement run in its own transaction.
    pub fn write<T>(
        &self,
        operation: &str,
        op: impl FnOnce(&mut SqliteConnection) -> QueryResult<T>,
    ) -> Result<T, ApiError> {
        translate_faults(operation, || {
            let mut conn = self.checkout()?;
            with_rollback(&mut *conn, op)
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// Fresh migrated database in a temporary directory. Keep the `TempDir`
    /// alive for as long as the database is used.
    pub fn database() -> (Database, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faitness.db");
        let db = Database::connect(path.to_str().unwrap(), &PoolSettings::default()).unwrap();
        db.run_migrations().unwrap();
        (db, dir)
    }
}
