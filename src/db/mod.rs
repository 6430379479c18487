//! Database abstraction layer.
//!
//! Trait-based data access so storage backends can be swapped without
//! touching the sync orchestrator or the API handlers.
//!
//! - `error`: storage-agnostic error types
//! - `models`: domain entities (Account, Activity, Position, SyncRun)
//! - `paths`: XDG path resolution for the database file
//! - `repository`: trait definitions for data access
//! - `sqlite`: sqlx-backed SQLite implementation

mod error;
mod models;
pub mod paths;
mod repository;
pub mod sqlite;
pub mod utils;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
