//! Change notification system for broadcasting sync lifecycle events to
//! WebSocket clients.
//!
//! The frontend's global listener consumes these to refresh cached data
//! and to update the keyed sync toast.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages broadcast as a sync run moves through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum UpdateMessage {
    /// The start request was accepted and the run is in flight.
    SyncStarted { run_id: String },
    /// The run finished; counts are entities written.
    SyncCompleted {
        run_id: String,
        accounts: usize,
        activities: usize,
        positions: usize,
    },
    /// The run failed after acceptance.
    SyncFailed { run_id: String, message: String },
}

/// Pub/sub notifier for broadcasting sync events to all subscribers.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<UpdateMessage>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Create a new ChangeNotifier with a buffer of 100 messages.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self { tx }
    }

    /// Subscribe to receive update notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<UpdateMessage> {
        self.tx.subscribe()
    }

    /// Broadcast an update message to all subscribers.
    pub fn notify(&self, msg: UpdateMessage) {
        let _ = self.tx.send(msg);
    }
}
