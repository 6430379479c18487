//! Tests for SQLite connection and migrations.

use crate::db::{Database, SqliteDatabase};

#[tokio::test]
async fn in_memory_database_migrates() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    // All four tables should exist after migration.
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .fetch_all(db.pool())
    .await
    .unwrap();

    for expected in ["account", "activity", "position", "sync_run"] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {expected}, got {tables:?}"
        );
    }
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db.migrate().await.unwrap();
}

#[tokio::test]
async fn open_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.db");

    let db = SqliteDatabase::open(&path).await.unwrap();
    db.migrate().await.unwrap();

    assert!(path.exists());
}
