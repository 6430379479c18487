use leptos::prelude::*;

use crate::hooks::use_broker_sync;

/// Button that starts a DSE broker sync.
///
/// Stays clickable while a request is in flight; the keyed loading toast
/// keeps repeated clicks from stacking notifications.
#[component]
pub fn SyncButton() -> impl IntoView {
    let sync = use_broker_sync();
    let trigger = sync.trigger;
    let pending = sync.pending;

    view! {
        <button
            on:click=move |_| trigger.run(())
            class="px-4 py-2 bg-ctp-blue text-ctp-base font-semibold rounded hover:bg-ctp-sapphire transition-colors"
        >
            {move || if pending.get() { "Syncing…" } else { "Sync broker data" }}
        </button>
    }
}
