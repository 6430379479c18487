//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::{
    SqliteAccountRepository, SqliteActivityRepository, SqlitePositionRepository,
    SqliteSyncRunRepository,
};
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Repositories are handed out via associated types, avoiding dynamic
/// dispatch; each borrows the pool.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database for tests.
    ///
    /// Capped at one connection: every pooled connection to
    /// `sqlite::memory:` would otherwise get its own empty database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct pool access for advanced operations and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Accounts<'a> = SqliteAccountRepository<'a>;
    type Activities<'a> = SqliteActivityRepository<'a>;
    type Positions<'a> = SqlitePositionRepository<'a>;
    type SyncRuns<'a> = SqliteSyncRunRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn accounts(&self) -> Self::Accounts<'_> {
        SqliteAccountRepository { pool: &self.pool }
    }

    fn activities(&self) -> Self::Activities<'_> {
        SqliteActivityRepository { pool: &self.pool }
    }

    fn positions(&self) -> Self::Positions<'_> {
        SqlitePositionRepository { pool: &self.pool }
    }

    fn sync_runs(&self) -> Self::SyncRuns<'_> {
        SqliteSyncRunRepository { pool: &self.pool }
    }
}
