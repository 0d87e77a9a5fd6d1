use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::infrastructure::BroadcastHub;

/// WebSocket connection state
pub struct WsState {
    pub hub: Arc<BroadcastHub>,
}

/// Handle WebSocket upgrade
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle WebSocket connection
///
/// The connection is push-only: the hub feeds this subscriber's queue
/// and the read side exists solely to notice the peer going away.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut sender, mut receiver) = socket.split();

    let (id, mut rx) = state.hub.register();
    tracing::debug!(subscriber = id, "push subscriber connected");

    // Pump hub messages into the socket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Client frames are ignored; the loop ends on close or error.
    while let Some(Ok(_)) = receiver.next().await {}

    state.hub.unregister(id);
    send_task.abort();
    tracing::debug!(subscriber = id, "push subscriber disconnected");
}
