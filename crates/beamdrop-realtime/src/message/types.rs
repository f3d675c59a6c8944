//! Inbound and outbound WebSocket message type definitions.
//!
//! Frames are JSON text, internally tagged on `"type"` with kebab-case
//! event names and camelCase payload fields. Binary chunk payloads travel
//! as base64 strings and are forwarded verbatim — the relay never
//! re-encodes them.

use serde::{Deserialize, Serialize};

use beamdrop_core::types::DeviceId;

use crate::registry::device::DeviceRecord;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// Set this device's display name.
    SetDeviceName {
        /// New display name.
        name: String,
    },
    /// Subscribe this connection as addressable under its own identity.
    JoinReceiveRoom,
    /// Announce a file transfer to a target device.
    #[serde(rename_all = "camelCase")]
    StartTransfer {
        /// Receiving device.
        target_id: DeviceId,
        /// Name of the file being sent.
        file_name: String,
        /// Total file size in bytes.
        file_size: u64,
    },
    /// One chunk of an in-flight transfer.
    #[serde(rename_all = "camelCase")]
    FileChunk {
        /// Receiving device.
        target_id: DeviceId,
        /// Base64-encoded chunk payload.
        chunk: String,
        /// Zero-based chunk index.
        index: u32,
        /// Total number of chunks in this transfer.
        total_chunks: u32,
    },
    /// Signal that all chunks have been sent.
    #[serde(rename_all = "camelCase")]
    TransferComplete {
        /// Receiving device.
        target_id: DeviceId,
    },
    /// Pong response to a server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// Full roster snapshot, broadcast after every registry change.
    DeviceList {
        /// All currently connected devices.
        devices: Vec<DeviceRecord>,
    },
    /// A peer wants to send this device a file.
    #[serde(rename_all = "camelCase")]
    IncomingTransfer {
        /// Sending device.
        sender_id: DeviceId,
        /// Name of the file being sent.
        file_name: String,
        /// Total file size in bytes.
        file_size: u64,
    },
    /// One relayed chunk.
    #[serde(rename_all = "camelCase")]
    ReceiveChunk {
        /// Base64-encoded chunk payload, exactly as the sender supplied it.
        chunk: String,
        /// Zero-based chunk index.
        index: u32,
        /// Total number of chunks in this transfer.
        total_chunks: u32,
    },
    /// Relay-accepted acknowledgement: the server forwarded this chunk.
    /// It does not mean the receiver has processed it.
    ChunkAck {
        /// Index of the acknowledged chunk.
        index: u32,
    },
    /// The sending peer has finished its transfer.
    TransferComplete,
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}
