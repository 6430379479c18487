use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api::{self, ApiClientError};
use crate::components::{
    ActivitiesTable, ErrorBanner, LoadingIndicator, Pagination, PositionsTable,
};
use crate::models::{Account, Activity, Paginated, Position, UpdateMessage};
use crate::websocket::use_websocket_updates;

const PAGE_SIZE: usize = 25;

#[component]
pub fn AccountDetail() -> impl IntoView {
    let params = use_params_map();
    let account_id = move || params.read().get("id").unwrap_or_default();

    let (account_data, set_account_data) = signal(None::<Result<Account, ApiClientError>>);
    let (positions_data, set_positions_data) =
        signal(None::<Result<Vec<Position>, ApiClientError>>);
    let (activities_data, set_activities_data) =
        signal(None::<Result<Paginated<Activity>, ApiClientError>>);
    let (page, set_page) = signal(0usize);

    let ws_updates = use_websocket_updates();
    let (refetch_trigger, set_refetch_trigger) = signal(0u32);

    Effect::new(move || {
        if let Some(UpdateMessage::SyncCompleted { .. }) = ws_updates.get() {
            set_refetch_trigger.update(|n| *n = n.wrapping_add(1));
        }
    });

    // Account and positions refetch on sync completion or route change
    Effect::new(move || {
        let id = account_id();
        let _ = refetch_trigger.get();
        if id.is_empty() {
            return;
        }

        spawn_local(async move {
            set_account_data.set(Some(api::accounts::get(&id).await));
            set_positions_data.set(Some(api::accounts::positions(&id).await));
        });
    });

    // Activities additionally refetch on page change
    Effect::new(move || {
        let id = account_id();
        let current_page = page.get();
        let _ = refetch_trigger.get();
        if id.is_empty() {
            return;
        }

        set_activities_data.set(None);
        spawn_local(async move {
            let result =
                api::activities::list(&id, Some(PAGE_SIZE), Some(current_page * PAGE_SIZE)).await;
            set_activities_data.set(Some(result));
        });
    });

    let activities_total = Signal::derive(move || {
        activities_data
            .get()
            .and_then(|r| r.ok().map(|p| p.total))
            .unwrap_or(0)
    });

    view! {
        <div class="container mx-auto p-6">
            {move || {
                account_data
                    .get()
                    .map(|result| match result {
                        Ok(account) => {
                            view! {
                                <div class="mb-6">
                                    <h2 class="text-3xl font-bold text-ctp-text mb-1">
                                        {account.name.clone()}
                                    </h2>
                                    <p class="text-ctp-subtext0 text-sm font-mono">
                                        {account.account_number.clone().unwrap_or_else(|| "—".to_string())}
                                        " · " {account.institution.clone()}
                                        " · " {account.currency.clone()}
                                    </p>
                                </div>
                            }
                                .into_any()
                        }
                        Err(err) => {
                            view! {
                                <ErrorBanner message=format!("Error loading account: {}", err)/>
                            }
                                .into_any()
                        }
                    })
                    .unwrap_or_else(|| view! { <LoadingIndicator/> }.into_any())
            }}

            <h3 class="text-xl font-semibold text-ctp-text mb-3">"Positions"</h3>
            <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4 mb-8">
                {move || {
                    positions_data
                        .get()
                        .map(|result| match result {
                            Ok(positions) => view! { <PositionsTable positions/> }.into_any(),
                            Err(err) => {
                                view! {
                                    <ErrorBanner message=format!("Error loading positions: {}", err)/>
                                }
                                    .into_any()
                            }
                        })
                        .unwrap_or_else(|| view! { <LoadingIndicator/> }.into_any())
                }}
            </div>

            <h3 class="text-xl font-semibold text-ctp-text mb-3">"Activities"</h3>
            <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4">
                {move || {
                    activities_data
                        .get()
                        .map(|result| match result {
                            Ok(paginated) => {
                                view! {
                                    <div>
                                        <ActivitiesTable activities=paginated.items.clone()/>
                                        <div class="mt-4">
                                            <Pagination
                                                current_page=page
                                                total_items=activities_total
                                                page_size=PAGE_SIZE
                                                on_prev=Callback::new(move |_| {
                                                    set_page.update(|p| *p = p.saturating_sub(1));
                                                })
                                                on_next=Callback::new(move |_| {
                                                    set_page.update(|p| *p += 1);
                                                })
                                                item_name="activities".to_string()
                                            />
                                        </div>
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(err) => {
                                view! {
                                    <ErrorBanner message=format!("Error loading activities: {}", err)/>
                                }
                                    .into_any()
                            }
                        })
                        .unwrap_or_else(|| view! { <LoadingIndicator/> }.into_any())
                }}
            </div>
        </div>
    }
}
