//! SQLite SyncRunRepository implementation.

use sqlx::{Row, SqlitePool};

use crate::db::{DbError, DbResult, SyncRun, SyncRunRepository, SyncRunStatus};

/// SQLx-backed sync run repository.
pub struct SqliteSyncRunRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_run(row: &sqlx::sqlite::SqliteRow) -> DbResult<SyncRun> {
    let status_raw: String = row.get("status");
    let status = SyncRunStatus::parse(&status_raw).ok_or_else(|| DbError::InvalidData {
        message: format!("unknown sync run status '{}'", status_raw),
    })?;

    let accounts: i64 = row.get("accounts");
    let activities: i64 = row.get("activities");
    let positions: i64 = row.get("positions");

    Ok(SyncRun {
        id: row.get("id"),
        status,
        message: row.get("message"),
        accounts: accounts as usize,
        activities: activities as usize,
        positions: positions as usize,
        started_at: row.get("started_at"),
        finished_at: row.get("finished_at"),
    })
}

impl<'a> SyncRunRepository for SqliteSyncRunRepository<'a> {
    async fn create(&self, run: &SyncRun) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO sync_run (id, status, message, accounts, activities, positions, started_at, finished_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&run.id)
        .bind(run.status.as_str())
        .bind(&run.message)
        .bind(run.accounts as i64)
        .bind(run.activities as i64)
        .bind(run.positions as i64)
        .bind(&run.started_at)
        .bind(&run.finished_at)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(())
    }

    async fn update(&self, run: &SyncRun) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE sync_run
             SET status = ?, message = ?, accounts = ?, activities = ?, positions = ?, finished_at = ?
             WHERE id = ?",
        )
        .bind(run.status.as_str())
        .bind(&run.message)
        .bind(run.accounts as i64)
        .bind(run.activities as i64)
        .bind(run.positions as i64)
        .bind(&run.finished_at)
        .bind(&run.id)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "SyncRun".to_string(),
                id: run.id.clone(),
            });
        }

        Ok(())
    }

    async fn get(&self, id: &str) -> DbResult<SyncRun> {
        let row = sqlx::query("SELECT * FROM sync_run WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "SyncRun".to_string(),
            id: id.to_string(),
        })?;

        row_to_run(&row)
    }

    async fn latest(&self) -> DbResult<Option<SyncRun>> {
        let row = sqlx::query("SELECT * FROM sync_run ORDER BY started_at DESC, id DESC LIMIT 1")
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        row.as_ref().map(row_to_run).transpose()
    }
}
