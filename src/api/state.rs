//! Application state for the API server.

use std::sync::Arc;

use super::notifier::ChangeNotifier;
use crate::broker::BrokerClient;
use crate::db::Database;
use crate::sync::SyncManager;

/// Shared application state.
///
/// Generic over the database and the broker client so tests can inject
/// an in-memory database and a scripted broker. All dependencies come in
/// via the constructor.
pub struct AppState<D: Database, B: BrokerClient> {
    db: Arc<D>,
    sync_manager: SyncManager<B>,
    notifier: ChangeNotifier,
}

// Manual Clone impl - only the Arcs need to be cloneable, not D or B.
impl<D: Database, B: BrokerClient> Clone for AppState<D, B> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            sync_manager: self.sync_manager.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<D: Database, B: BrokerClient> AppState<D, B> {
    pub fn new(db: D, sync_manager: SyncManager<B>, notifier: ChangeNotifier) -> Self {
        Self {
            db: Arc::new(db),
            sync_manager,
            notifier,
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a cloned Arc to the database, for spawned tasks.
    pub fn db_arc(&self) -> Arc<D> {
        Arc::clone(&self.db)
    }

    /// Get a reference to the sync manager.
    pub fn sync_manager(&self) -> &SyncManager<B> {
        &self.sync_manager
    }

    /// Get a reference to the change notifier.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
