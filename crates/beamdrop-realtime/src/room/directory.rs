//! Room directory — maps device identities to their output handles.
//!
//! A connection only becomes addressable for relayed traffic after it
//! explicitly joins its own receive room. Traffic addressed to an
//! identity that never joined is dropped exactly like traffic to an
//! unknown identity.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use beamdrop_core::types::DeviceId;

use crate::connection::handle::ConnectionHandle;

/// Directory of joined receive rooms.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    /// Device ID → output handle of the connection that joined.
    rooms: DashMap<DeviceId, Arc<ConnectionHandle>>,
}

impl RoomDirectory {
    /// Creates a new empty directory.
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Subscribes a connection under its own identity.
    ///
    /// Idempotent: joining twice has no additional effect. Returns `true`
    /// on the first join.
    pub fn join(&self, handle: Arc<ConnectionHandle>) -> bool {
        let id = handle.id;
        if self.rooms.contains_key(&id) {
            return false;
        }
        self.rooms.insert(id, handle);
        debug!(device_id = %id, "Joined receive room");
        true
    }

    /// Removes a device's room, if any. Idempotent.
    pub fn leave(&self, id: &DeviceId) {
        if self.rooms.remove(id).is_some() {
            debug!(device_id = %id, "Left receive room");
        }
    }

    /// Looks up the output handle for a joined identity.
    pub fn lookup(&self, id: &DeviceId) -> Option<Arc<ConnectionHandle>> {
        self.rooms.get(id).map(|entry| entry.value().clone())
    }

    /// Checks whether an identity has joined its receive room.
    pub fn is_joined(&self, id: &DeviceId) -> bool {
        self.rooms.contains_key(id)
    }

    /// Returns the number of joined rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Checks whether no rooms are joined.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
