//! WebSocket endpoint streaming sync lifecycle events.
//!
//! Each connected client gets its own subscription to the
//! [`ChangeNotifier`](super::notifier::ChangeNotifier); events are sent as
//! JSON text frames in the `UpdateMessage` wire format the frontend parses.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use tracing::{debug, error, info};

use super::notifier::UpdateMessage;
use super::state::AppState;
use crate::broker::BrokerClient;
use crate::db::Database;

pub async fn ws_handler<D: Database + 'static, B: BrokerClient + 'static>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<D, B>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| relay_events(socket, state))
}

async fn send_event(socket: &mut WebSocket, update: UpdateMessage) -> bool {
    let json = match serde_json::to_string(&update) {
        Ok(j) => j,
        Err(e) => {
            error!("Failed to serialize update: {}", e);
            return true;
        }
    };

    if let Err(e) = socket.send(Message::Text(json.into())).await {
        error!("Failed to send update: {}", e);
        return false;
    }
    true
}

/// Relay broadcast events to one client until either side closes.
///
/// Client frames are only inspected for close; the protocol is
/// push-only.
async fn relay_events<D: Database, B: BrokerClient>(mut socket: WebSocket, state: AppState<D, B>) {
    info!("WebSocket client connected");

    let mut rx = state.notifier().subscribe();

    loop {
        tokio::select! {
            Some(msg) = socket.recv() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        debug!("Ignoring client frame: {}", text);
                    }
                    Ok(Message::Close(_)) => {
                        info!("Client closed connection");
                        break;
                    }
                    Err(e) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }

            Ok(update) = rx.recv() => {
                if !send_event(&mut socket, update).await {
                    break;
                }
            }
        }
    }

    info!("WebSocket client disconnected");
}
