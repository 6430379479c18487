//! Hook for triggering a DSE broker sync
//!
//! Wraps the POST /api/v1/sync call: on acceptance it shows the keyed
//! loading toast, on failure an error toast. It never dismisses the loading
//! toast itself; the WebSocket listener replaces it when the run finishes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use folio::notifications::{sync_start_failed_toast, sync_started_toast};

use crate::api;
use crate::toast::use_toaster;

/// Reactive handle returned by [`use_broker_sync`]
pub struct UseBrokerSyncReturn {
    /// Starts a sync run when called
    pub trigger: Callback<()>,
    /// True while the start request is in flight
    pub pending: ReadSignal<bool>,
    /// Message of the most recent start failure, cleared on retrigger
    pub error: ReadSignal<Option<String>>,
}

/// Hook for starting a broker sync from any component.
///
/// Calls while a request is already in flight are not coalesced; each call
/// sends its own request and the keyed toast deduplicates what the user sees.
pub fn use_broker_sync() -> UseBrokerSyncReturn {
    let toaster = use_toaster();
    let (pending, set_pending) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let trigger = Callback::new(move |_: ()| {
        set_pending.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::sync::start().await {
                Ok(started) => {
                    web_sys::console::log_1(
                        &format!("Sync run {} accepted", started.run_id).into(),
                    );
                    toaster.push(sync_started_toast());
                }
                Err(e) => {
                    let message = e.message();
                    toaster.push(sync_start_failed_toast(Some(&message)));
                    set_error.set(Some(message));
                }
            }
            set_pending.set(false);
        });
    });

    UseBrokerSyncReturn {
        trigger,
        pending,
        error,
    }
}
