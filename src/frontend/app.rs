use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use leptos_use::core::ConnectionReadyState;
use thaw::*;

use crate::pages::{AccountDetail, Dashboard};
use crate::toast::{SyncToastListener, ToastProvider};
use crate::websocket::{WebSocketProvider, use_websocket_connection};

#[component]
pub fn App() -> impl IntoView {
    // Thaw components need an explicit theme; the app is dark-only.
    let theme = RwSignal::new(Theme::dark());

    view! {
        <ConfigProvider theme>
            <WebSocketProvider>
                <ToastProvider>
                    <SyncToastListener/>
                    <Router>
                        <Shell/>
                    </Router>
                </ToastProvider>
            </WebSocketProvider>
        </ConfigProvider>
    }
}

/// Edge strip showing the event-stream connection state.
#[component]
fn ConnectionStrip() -> impl IntoView {
    let ws_state = use_websocket_connection();

    let label = move || match ws_state.get() {
        ConnectionReadyState::Open => "Connected",
        ConnectionReadyState::Connecting => "Connecting...",
        ConnectionReadyState::Closing => "Closing...",
        ConnectionReadyState::Closed => "Disconnected",
    };

    let color = move || match ws_state.get() {
        ConnectionReadyState::Open => "bg-ctp-green",
        ConnectionReadyState::Connecting | ConnectionReadyState::Closing => "bg-ctp-yellow",
        ConnectionReadyState::Closed => "bg-ctp-red",
    };

    view! {
        <Tooltip content=label>
            <div class=move || {
                format!("absolute left-0 top-0 bottom-0 w-2 cursor-help {}", color())
            }></div>
        </Tooltip>
    }
}

#[component]
fn Shell() -> impl IntoView {
    view! {
        <main class="min-h-screen bg-ctp-base flex flex-col">
            <nav class="bg-ctp-surface0 border-b border-ctp-surface1 relative">
                <ConnectionStrip/>
                <div class="container mx-auto flex items-center gap-2 px-6 py-4">
                    <a href="/">
                        <h1 class="text-3xl font-bold bg-gradient-to-r from-ctp-mauve to-ctp-blue bg-clip-text text-transparent">
                            "folio"
                        </h1>
                    </a>
                    <span class="text-xs text-ctp-subtext0 font-mono">
                        {env!("CARGO_PKG_VERSION")}
                    </span>
                </div>
            </nav>

            <div class="flex-1">
                <Routes fallback=|| view! { <p class="p-6 text-ctp-subtext0">"Page not found"</p> }>
                    <Route path=path!("/") view=Dashboard/>
                    <Route path=path!("/accounts/:id") view=AccountDetail/>
                </Routes>
            </div>

            <footer class="py-6 px-6 border-t border-ctp-surface1 bg-ctp-surface0">
                <div class="container mx-auto text-center text-sm text-ctp-subtext0">
                    <p>
                        "folio · DSE portfolio tracker · "
                        <a href="https://www.gnu.org/licenses/old-licenses/gpl-2.0.html" target="_blank" rel="noopener noreferrer"
                            class="text-ctp-blue hover:text-ctp-lavender underline">
                            "GPL-2.0"
                        </a>
                    </p>
                </div>
            </footer>
        </main>
    }
}
