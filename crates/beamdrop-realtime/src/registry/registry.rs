//! Device registry — the single source of truth for connected devices.
//!
//! One entry per currently connected device, keyed by connection identity.
//! Every mutation here must be followed by a roster broadcast; the
//! [`ConnectionManager`](crate::connection::manager::ConnectionManager)
//! owns that pairing.

use dashmap::DashMap;
use tracing::warn;

use beamdrop_core::types::DeviceId;

use super::device::DeviceRecord;

/// Registry of all currently connected devices.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    /// Device ID → record.
    devices: DashMap<DeviceId, DeviceRecord>,
}

impl DeviceRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            devices: DashMap::new(),
        }
    }

    /// Inserts a record for a freshly connected device.
    ///
    /// Identities are minted per connection, so a collision means a stale
    /// entry; the fresh record replaces it.
    pub fn insert(&self, id: DeviceId) -> DeviceRecord {
        let record = DeviceRecord::new(id);
        if self.devices.insert(id, record.clone()).is_some() {
            warn!(device_id = %id, "Registry insert replaced an existing record");
        }
        record
    }

    /// Renames a device in place.
    ///
    /// Returns `true` when the registry changed. An empty name or an
    /// unknown identity is a silent no-op, not an error.
    pub fn rename(&self, id: &DeviceId, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        match self.devices.get_mut(id) {
            Some(mut record) => {
                record.name = Some(name.to_string());
                true
            }
            None => false,
        }
    }

    /// Removes a device. Idempotent: removing an absent identity is a
    /// no-op. Returns `true` when an entry was actually removed.
    pub fn remove(&self, id: &DeviceId) -> bool {
        self.devices.remove(id).is_some()
    }

    /// Returns a snapshot of all records. Iteration order is unspecified.
    pub fn snapshot(&self) -> Vec<DeviceRecord> {
        self.devices.iter().map(|e| e.value().clone()).collect()
    }

    /// Looks up a single record.
    pub fn get(&self, id: &DeviceId) -> Option<DeviceRecord> {
        self.devices.get(id).map(|e| e.value().clone())
    }

    /// Checks whether an identity is registered.
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.devices.contains_key(id)
    }

    /// Returns the number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Checks whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
