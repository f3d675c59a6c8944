//! Connection pool — all open connections indexed by device identity.

use std::sync::Arc;

use dashmap::DashMap;

use beamdrop_core::types::DeviceId;

use super::handle::ConnectionHandle;

/// Thread-safe pool of all open WebSocket connections.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    /// Device ID → connection handle.
    by_id: DashMap<DeviceId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates a new empty connection pool.
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
        }
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, id: &DeviceId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.remove(id).map(|(_, handle)| handle)
    }

    /// Gets a specific connection by identity.
    pub fn get(&self, id: &DeviceId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(id).map(|entry| entry.value().clone())
    }

    /// Returns all connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Returns the total number of open connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }
}
