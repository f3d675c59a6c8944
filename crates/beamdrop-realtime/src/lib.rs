//! # beamdrop-realtime
//!
//! Real-time engine for Beamdrop. Provides:
//!
//! - WebSocket connection lifecycle management
//! - Device registry with live roster broadcast
//! - Receive-room directory for targeted delivery
//! - Chunked file-transfer relay with relay-accepted acknowledgements
//! - Ping/pong heartbeat

pub mod connection;
pub mod message;
pub mod registry;
pub mod relay;
pub mod room;
pub mod server;

pub use connection::manager::ConnectionManager;
pub use registry::registry::DeviceRegistry;
pub use relay::transfer::{RelayOutcome, TransferRelay};
pub use room::directory::RoomDirectory;
pub use server::RelayEngine;
