//! WebSocket upgrade handler.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use beamdrop_realtime::connection::heartbeat::run_heartbeat;

use crate::state::AppState;

/// GET /ws — WebSocket upgrade
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_ws_connection(state, socket))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    // Register connection; the device identity is minted here and the
    // roster broadcast announcing it goes out before the first frame.
    let (handle, mut outbound_rx) = state.engine.connections.register();
    let device_id = handle.id;

    info!(device_id = %device_id, "WebSocket connection established");

    // Spawn outbound message forwarder
    let outbound_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(t) => t,
                Err(e) => {
                    warn!(device_id = %device_id, error = %e, "Failed to serialize outbound message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Spawn application-level heartbeat
    let heartbeat_task = tokio::spawn(run_heartbeat(
        handle.clone(),
        state.engine.heartbeat_config(),
    ));

    let mut shutdown_rx = state.engine.subscribe_shutdown();
    // Wakes the loop so a heartbeat timeout closes the connection even
    // when the client sends nothing.
    let mut liveness = tokio::time::interval(std::time::Duration::from_secs(1));
    let mut close_reason = "client disconnect";

    // Process inbound messages
    loop {
        tokio::select! {
            frame = ws_rx.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        state.engine.connections.handle_inbound(&device_id, &text).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary frames are not part of the protocol;
                        // transport ping/pong is handled by axum.
                    }
                    Some(Err(e)) => {
                        warn!(device_id = %device_id, error = %e, "WebSocket error");
                        close_reason = "transport error";
                        break;
                    }
                    None => {
                        close_reason = "stream ended";
                        break;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                close_reason = "server shutdown";
                break;
            }
            _ = liveness.tick() => {}
        }

        if !handle.is_alive() {
            close_reason = "heartbeat timeout";
            break;
        }
    }

    // Cleanup
    outbound_task.abort();
    heartbeat_task.abort();
    state.engine.connections.unregister(&device_id, close_reason);

    info!(device_id = %device_id, reason = close_reason, "WebSocket connection closed");
}
