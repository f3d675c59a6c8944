//! Device record entry in the registry.

use serde::{Deserialize, Serialize};

use beamdrop_core::types::DeviceId;

/// A connected device as seen in the roster.
///
/// `name` stays unset until the client renames itself; the fallback label
/// is derived from the identity at display time and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Connection identity.
    pub id: DeviceId,
    /// User-set display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DeviceRecord {
    /// Creates an unnamed record for a freshly connected device.
    pub fn new(id: DeviceId) -> Self {
        Self { id, name: None }
    }

    /// Display label: the user-set name, or a default derived from the id.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Device {}", self.id.short()),
        }
    }
}
