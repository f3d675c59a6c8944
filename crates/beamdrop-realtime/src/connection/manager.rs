//! Connection manager — orchestrates the connection lifecycle and
//! dispatches inbound events.
//!
//! Every registry mutation performed here is immediately followed by a
//! roster broadcast, inside the same call, so no observer is left with a
//! stale roster for longer than one broadcast cycle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use beamdrop_core::config::realtime::RealtimeConfig;
use beamdrop_core::types::DeviceId;

use crate::message::types::{InboundMessage, OutboundMessage};
use crate::message::validator;
use crate::registry::registry::DeviceRegistry;
use crate::registry::roster::RosterBroadcaster;
use crate::relay::transfer::{RelayOutcome, TransferRelay};
use crate::room::directory::RoomDirectory;

use super::handle::ConnectionHandle;
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Device registry.
    registry: Arc<DeviceRegistry>,
    /// Receive-room directory.
    rooms: Arc<RoomDirectory>,
    /// Transfer relay.
    relay: Arc<TransferRelay>,
    /// Roster broadcaster.
    roster: RosterBroadcaster,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(
        config: RealtimeConfig,
        pool: Arc<ConnectionPool>,
        registry: Arc<DeviceRegistry>,
        rooms: Arc<RoomDirectory>,
        relay: Arc<TransferRelay>,
    ) -> Self {
        let roster = RosterBroadcaster::new(pool.clone());
        Self {
            pool,
            registry,
            rooms,
            relay,
            roster,
            config,
        }
    }

    /// Registers a new connection and mints its device identity.
    ///
    /// Returns the connection handle and the receiver for its outbound
    /// messages. The roster broadcast triggered here includes the new
    /// device, and the new connection receives it too.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(DeviceId::new(), tx));

        self.pool.add(handle.clone());
        self.registry.insert(handle.id);
        self.roster.publish(&self.registry);

        info!(device_id = %handle.id, "Device connected");

        (handle, rx)
    }

    /// Unregisters a connection, removing it from the pool, its receive
    /// room, and the registry.
    ///
    /// Idempotent: transport errors and graceful disconnects both funnel
    /// here, whichever fires first wins and the second call is a no-op.
    /// The reason is recorded for observability only.
    pub fn unregister(&self, id: &DeviceId, reason: &str) {
        let removed_handle = self.pool.remove(id);
        if let Some(handle) = &removed_handle {
            handle.mark_dead();
        }
        self.rooms.leave(id);

        if self.registry.remove(id) {
            self.roster.publish(&self.registry);
            info!(device_id = %id, reason, "Device disconnected");
        } else if removed_handle.is_some() {
            debug!(device_id = %id, reason, "Connection removed without registry entry");
        }
    }

    /// Processes one inbound frame from a client.
    pub async fn handle_inbound(&self, id: &DeviceId, raw: &str) {
        let handle = match self.pool.get(id) {
            Some(h) => h,
            None => {
                warn!(device_id = %id, "Frame from unknown connection");
                return;
            }
        };

        // An inbound frame means the client is draining its queue; catch
        // it up on any roster broadcast it missed while the queue was full.
        self.roster.refresh(&handle, &self.registry);

        if let Err(e) = validator::validate_frame(raw) {
            warn!(device_id = %id, error = %e, "Dropping invalid frame");
            return;
        }

        let msg: InboundMessage = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                let _ = handle
                    .send(OutboundMessage::Error {
                        code: "INVALID_MESSAGE".to_string(),
                        message: format!("Failed to parse message: {e}"),
                    })
                    .await;
                return;
            }
        };

        match msg {
            InboundMessage::SetDeviceName { name } => {
                if self.registry.rename(id, &name) {
                    self.roster.publish(&self.registry);
                    info!(device_id = %id, name = %name, "Device renamed");
                } else {
                    debug!(device_id = %id, "Ignoring rename with empty name or missing record");
                }
            }
            InboundMessage::JoinReceiveRoom => {
                self.rooms.join(handle);
            }
            InboundMessage::StartTransfer {
                target_id,
                file_name,
                file_size,
            } => {
                self.relay
                    .start_transfer(*id, target_id, file_name, file_size)
                    .await;
            }
            InboundMessage::FileChunk {
                target_id,
                chunk,
                index,
                total_chunks,
            } => {
                let outcome = self
                    .relay
                    .relay_chunk(*id, target_id, chunk, index, total_chunks)
                    .await;

                // Relay-accepted acknowledgement: sent for every chunk the
                // relay accepted, whether or not the target exists. Only a
                // rejected (malformed) chunk goes unacknowledged.
                if outcome != RelayOutcome::Rejected {
                    let _ = handle.send(OutboundMessage::ChunkAck { index }).await;
                }
            }
            InboundMessage::TransferComplete { target_id } => {
                self.relay.complete_transfer(*id, target_id).await;
            }
            InboundMessage::Pong { .. } => {
                handle.record_pong().await;
            }
        }
    }

    /// Closes all connections and empties the registry.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for handle in &all {
            handle.mark_dead();
            self.pool.remove(&handle.id);
            self.rooms.leave(&handle.id);
            self.registry.remove(&handle.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the number of open connections.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }
}
