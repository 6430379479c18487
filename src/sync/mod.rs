//! Broker synchronization.
//!
//! Pulls accounts, activities, and holdings from the broker API into the
//! local database. A sync run is accepted (recorded as `running`) before
//! the pull starts; the orchestrator finishes the record as `completed`
//! or `failed`.

mod manager;

#[cfg(test)]
mod manager_test;

pub use manager::{SyncError, SyncManager, SyncSummary};
