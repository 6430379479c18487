//! WebSocket connection management for real-time sync updates

use codee::string::JsonSerdeCodec;
use leptos::prelude::*;
use leptos_use::core::ConnectionReadyState;
use leptos_use::{UseWebSocketOptions, UseWebSocketReturn, use_websocket_with_options};

use crate::models::UpdateMessage;

// Development: Trunk proxy forwards /ws to the backend at localhost:3737
#[cfg(debug_assertions)]
const WS_URL: &str = "ws://localhost:8080/ws";

// Production: Direct connection to backend WebSocket
#[cfg(not(debug_assertions))]
fn get_ws_url() -> String {
    let window = web_sys::window().expect("no window");
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:3737".to_string());

    // Convert http(s) to ws(s)
    let ws_protocol = if protocol == "https:" { "wss:" } else { "ws:" };

    format!("{}//{}/ws", ws_protocol, host)
}

/// Shared WebSocket state, provided once at the app root so every consumer
/// observes the same connection.
#[derive(Clone, Copy)]
pub struct WebSocketContext {
    pub ready_state: Signal<ConnectionReadyState>,
    pub message: Signal<Option<UpdateMessage>>,
}

/// Opens the WebSocket connection and provides [`WebSocketContext`] to children
#[component]
pub fn WebSocketProvider(children: Children) -> impl IntoView {
    #[cfg(debug_assertions)]
    let url = WS_URL.to_string();

    #[cfg(not(debug_assertions))]
    let url = get_ws_url();

    let UseWebSocketReturn {
        ready_state,
        message,
        send: _,
        open: _,
        close: _,
        ..
    } = use_websocket_with_options::<UpdateMessage, UpdateMessage, JsonSerdeCodec>(
        &url,
        UseWebSocketOptions::default()
            .immediate(true) // Connect immediately on mount
            .reconnect_limit(leptos_use::ReconnectLimit::Limited(5)) // Retry up to 5 times
            .reconnect_interval(3000) // 3 seconds between retries
            .on_error(|error| {
                web_sys::console::error_1(&format!("WebSocket error: {:?}", error).into());
            }),
    );

    provide_context(WebSocketContext {
        ready_state,
        message,
    });

    children()
}

/// Connection ready state, for displaying connection status
pub fn use_websocket_connection() -> Signal<ConnectionReadyState> {
    expect_context::<WebSocketContext>().ready_state
}

/// Latest sync lifecycle event received from the backend
pub fn use_websocket_updates() -> Signal<Option<UpdateMessage>> {
    expect_context::<WebSocketContext>().message
}
