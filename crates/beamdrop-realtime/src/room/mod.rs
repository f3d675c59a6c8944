//! Receive-room directory for targeted delivery.

pub mod directory;

pub use directory::RoomDirectory;
