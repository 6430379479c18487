use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClientError};
use crate::components::{AccountCard, ErrorBanner, LoadingIndicator, SyncButton};
use crate::models::{Account, SyncStatus, UpdateMessage};
use crate::websocket::use_websocket_updates;

#[component]
pub fn Dashboard() -> impl IntoView {
    let (accounts_data, set_accounts_data) =
        signal(None::<Result<Vec<Account>, ApiClientError>>);
    let (sync_status, set_sync_status) = signal(None::<SyncStatus>);

    let ws_updates = use_websocket_updates();
    let (refetch_trigger, set_refetch_trigger) = signal(0u32);

    // Completed syncs change account data; refetch when one lands
    Effect::new(move || {
        if let Some(UpdateMessage::SyncCompleted { .. } | UpdateMessage::SyncFailed { .. }) =
            ws_updates.get()
        {
            set_refetch_trigger.update(|n| *n = n.wrapping_add(1));
        }
    });

    Effect::new(move || {
        let _ = refetch_trigger.get();

        spawn_local(async move {
            let result = api::accounts::list().await;
            set_accounts_data.set(Some(result));

            if let Ok(status) = api::sync::status().await {
                set_sync_status.set(Some(status));
            }
        });
    });

    view! {
        <div class="container mx-auto p-6">
            <div class="flex justify-between items-center mb-2">
                <h2 class="text-3xl font-bold text-ctp-text">"Portfolio"</h2>
                <SyncButton/>
            </div>

            <p class="text-sm text-ctp-overlay0 mb-6">
                {move || match sync_status.get() {
                    Some(status) if status.status == "never_synced" => {
                        "No sync has run yet.".to_string()
                    }
                    Some(status) => {
                        let when = status
                            .finished_at
                            .or(status.started_at)
                            .unwrap_or_else(|| "unknown".to_string());
                        format!("Last sync: {} ({})", status.status, when)
                    }
                    None => String::new(),
                }}
            </p>

            {move || {
                accounts_data
                    .get()
                    .map(|result| match result {
                        Ok(accounts) => {
                            if accounts.is_empty() {
                                view! {
                                    <p class="text-ctp-subtext0">
                                        "No accounts yet. Sync broker data to get started."
                                    </p>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4 auto-rows-fr">
                                        {accounts
                                            .into_iter()
                                            .map(|account| view! { <AccountCard account/> })
                                            .collect_view()}
                                    </div>
                                }
                                    .into_any()
                            }
                        }
                        Err(err) => {
                            view! {
                                <ErrorBanner message=format!("Error loading accounts: {}", err)/>
                            }
                                .into_any()
                        }
                    })
                    .unwrap_or_else(|| view! { <LoadingIndicator/> }.into_any())
            }}
        </div>
    }
}
