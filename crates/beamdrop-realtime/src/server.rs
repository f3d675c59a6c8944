//! Relay engine — wires the realtime components together and owns
//! shutdown signalling.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use beamdrop_core::config::realtime::RealtimeConfig;

use crate::connection::heartbeat::HeartbeatConfig;
use crate::connection::manager::ConnectionManager;
use crate::connection::pool::ConnectionPool;
use crate::registry::registry::DeviceRegistry;
use crate::relay::transfer::TransferRelay;
use crate::room::directory::RoomDirectory;

/// Top-level realtime engine.
///
/// One instance lives for the lifetime of the process and is shared
/// across all connection tasks.
#[derive(Debug)]
pub struct RelayEngine {
    /// Connection lifecycle and dispatch.
    pub connections: Arc<ConnectionManager>,
    /// Device registry.
    pub registry: Arc<DeviceRegistry>,
    /// Receive-room directory.
    pub rooms: Arc<RoomDirectory>,
    /// Transfer relay.
    pub relay: Arc<TransferRelay>,
    /// Realtime configuration.
    config: RealtimeConfig,
    /// Shutdown broadcast to connection tasks.
    shutdown_tx: broadcast::Sender<()>,
}

impl RelayEngine {
    /// Creates a new engine from configuration.
    pub fn new(config: RealtimeConfig) -> Self {
        let pool = Arc::new(ConnectionPool::new());
        let registry = Arc::new(DeviceRegistry::new());
        let rooms = Arc::new(RoomDirectory::new());
        let relay = Arc::new(TransferRelay::new(rooms.clone(), config.max_chunk_bytes));
        let connections = Arc::new(ConnectionManager::new(
            config.clone(),
            pool,
            registry.clone(),
            rooms.clone(),
            relay.clone(),
        ));
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            connections,
            registry,
            rooms,
            relay,
            config,
            shutdown_tx,
        }
    }

    /// Returns the heartbeat timing derived from configuration.
    pub fn heartbeat_config(&self) -> HeartbeatConfig {
        HeartbeatConfig::from_realtime(&self.config)
    }

    /// Subscribes to the shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signals all connection tasks to stop and closes every connection.
    pub fn shutdown(&self) {
        info!(
            connections = self.connections.connection_count(),
            "Shutting down relay engine"
        );
        let _ = self.shutdown_tx.send(());
        self.connections.close_all();
    }
}
