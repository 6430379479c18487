//! Repository traits for data access abstraction.
//!
//! All methods return `Send` futures so handlers and spawned sync tasks
//! stay `Send` when generic over the database type.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Account, Activity, ListQuery, ListResult, Position, SyncRun},
};

/// Repository for broker accounts.
pub trait AccountRepository {
    /// Insert or update an account by broker id.
    fn upsert(&self, account: &Account) -> impl Future<Output = DbResult<Account>> + Send;

    /// Get an account by id.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Account>> + Send;

    /// All accounts, ordered by name.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Account>>> + Send;
}

/// Repository for account activities.
pub trait ActivityRepository {
    /// Insert or update an activity, keyed on `(account_id, external_ref)`
    /// when a reference is present.
    fn upsert(&self, activity: &Activity) -> impl Future<Output = DbResult<Activity>> + Send;

    /// One page of an account's activities.
    fn list_paginated(
        &self,
        account_id: &str,
        query: &ListQuery,
    ) -> impl Future<Output = DbResult<ListResult<Activity>>> + Send;
}

/// Repository for open positions.
pub trait PositionRepository {
    /// Replace all positions of an account with the given set.
    fn replace_for_account(
        &self,
        account_id: &str,
        positions: &[Position],
    ) -> impl Future<Output = DbResult<usize>> + Send;

    /// Current positions of one account, ordered by symbol.
    fn list_by_account(
        &self,
        account_id: &str,
    ) -> impl Future<Output = DbResult<Vec<Position>>> + Send;
}

/// Repository for sync run records.
pub trait SyncRunRepository {
    /// Record a newly accepted run.
    fn create(&self, run: &SyncRun) -> impl Future<Output = DbResult<()>> + Send;

    /// Update a run's status, counts, and finish time.
    fn update(&self, run: &SyncRun) -> impl Future<Output = DbResult<()>> + Send;

    /// Get a run by id.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<SyncRun>> + Send;

    /// The most recently started run, if any.
    fn latest(&self) -> impl Future<Output = DbResult<Option<SyncRun>>> + Send;
}

/// Facade over the concrete storage backend.
///
/// Repositories are associated types so implementations avoid dynamic
/// dispatch and can borrow the connection pool.
pub trait Database: Send + Sync {
    type Accounts<'a>: AccountRepository + Send + Sync
    where
        Self: 'a;
    type Activities<'a>: ActivityRepository + Send + Sync
    where
        Self: 'a;
    type Positions<'a>: PositionRepository + Send + Sync
    where
        Self: 'a;
    type SyncRuns<'a>: SyncRunRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending schema migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    fn accounts(&self) -> Self::Accounts<'_>;
    fn activities(&self) -> Self::Activities<'_>;
    fn positions(&self) -> Self::Positions<'_>;
    fn sync_runs(&self) -> Self::SyncRuns<'_>;
}
