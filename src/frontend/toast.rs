//! Toast notifications
//!
//! Wraps the shared [`ToastRegistry`] in a reactive signal so any component
//! can push, replace, or dismiss toasts. Keyed pushes replace in place, which
//! is how the sync flow works: the trigger hook shows a loading toast and the
//! WebSocket listener later overwrites it under the same key.

use leptos::prelude::*;

use folio::notifications::{
    SYNC_START_TOAST_KEY, Toast, ToastHandle, ToastIntent, ToastRegistry,
};

use crate::models::UpdateMessage;
use crate::websocket::use_websocket_updates;

/// How long non-loading toasts stay on screen
const AUTO_DISMISS: std::time::Duration = std::time::Duration::from_secs(6);

/// Reactive handle to the toast registry
#[derive(Clone, Copy)]
pub struct Toaster {
    registry: RwSignal<ToastRegistry>,
}

impl Toaster {
    /// Show a toast. Loading toasts stay until replaced or dismissed;
    /// everything else auto-dismisses.
    pub fn push(&self, toast: Toast) -> ToastHandle {
        let auto_dismiss = toast.intent != ToastIntent::Loading;
        let handle = self
            .registry
            .try_update(|reg| reg.push(toast))
            .unwrap_or_default();

        if auto_dismiss {
            let registry = self.registry;
            set_timeout(
                move || {
                    let _ = registry.try_update(|reg| reg.dismiss(handle));
                },
                AUTO_DISMISS,
            );
        }

        handle
    }

    pub fn dismiss(&self, handle: ToastHandle) {
        let _ = self.registry.try_update(|reg| reg.dismiss(handle));
    }

    pub fn dismiss_key(&self, key: &str) {
        let _ = self.registry.try_update(|reg| reg.dismiss_key(key));
    }
}

/// Access the toaster provided by [`ToastProvider`]
pub fn use_toaster() -> Toaster {
    expect_context::<Toaster>()
}

/// Provides the [`Toaster`] context and renders the toast overlay
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let toaster = Toaster {
        registry: RwSignal::new(ToastRegistry::new()),
    };
    provide_context(toaster);

    view! {
        {children()}
        <ToastHost/>
    }
}

fn intent_classes(intent: ToastIntent) -> &'static str {
    match intent {
        ToastIntent::Loading => "border-ctp-blue text-ctp-blue",
        ToastIntent::Info => "border-ctp-sky text-ctp-sky",
        ToastIntent::Success => "border-ctp-green text-ctp-green",
        ToastIntent::Error => "border-ctp-red text-ctp-red",
    }
}

fn intent_icon(intent: ToastIntent) -> &'static str {
    match intent {
        ToastIntent::Loading => "…",
        ToastIntent::Info => "i",
        ToastIntent::Success => "✓",
        ToastIntent::Error => "✗",
    }
}

/// Renders visible toasts stacked in the bottom-right corner
#[component]
fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();
    let registry = toaster.registry;

    view! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2 max-w-sm">
            <For
                each=move || registry.get().entries().to_vec()
                key=|entry| entry.handle
                children=move |entry| {
                    let handle = entry.handle;
                    let intent = entry.toast.intent;
                    view! {
                        <div class=format!(
                            "bg-ctp-surface0 border rounded-lg px-4 py-3 shadow-lg flex items-start gap-3 {}",
                            intent_classes(intent),
                        )>
                            <span class="font-bold flex-shrink-0">{intent_icon(intent)}</span>
                            <span class="text-ctp-text text-sm flex-1">{entry.toast.message.clone()}</span>
                            <button
                                class="text-ctp-overlay0 hover:text-ctp-text flex-shrink-0"
                                on:click=move |_| toaster.dismiss(handle)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Translates sync lifecycle events from the WebSocket into toasts.
///
/// Completion and failure toasts reuse the start toast's key, so they
/// replace the loading toast in place rather than stacking next to it.
#[component]
pub fn SyncToastListener() -> impl IntoView {
    let toaster = use_toaster();
    let updates = use_websocket_updates();

    Effect::new(move || {
        if let Some(message) = updates.get() {
            match message {
                UpdateMessage::SyncStarted { .. } => {
                    // The trigger hook already showed the loading toast for
                    // locally initiated syncs; this covers runs started
                    // elsewhere (CLI, another tab).
                    toaster.push(folio::notifications::sync_started_toast());
                }
                UpdateMessage::SyncCompleted {
                    accounts,
                    activities,
                    positions,
                    ..
                } => {
                    toaster.push(
                        Toast::new(
                            ToastIntent::Success,
                            format!(
                                "DSE sync complete: {} accounts, {} activities, {} positions",
                                accounts, activities, positions
                            ),
                        )
                        .with_key(SYNC_START_TOAST_KEY),
                    );
                }
                UpdateMessage::SyncFailed { message, .. } => {
                    toaster.push(
                        Toast::new(ToastIntent::Error, format!("DSE sync failed: {}", message))
                            .with_key(SYNC_START_TOAST_KEY),
                    );
                }
            }
        }
    });

    ()
}
