//! Device registry and roster broadcast.

pub mod device;
pub mod registry;
pub mod roster;

pub use device::DeviceRecord;
pub use registry::DeviceRegistry;
pub use roster::RosterBroadcaster;
