//! Real-time relay engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound channel buffer size per connection.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// WebSocket ping interval in seconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    /// WebSocket ping timeout in seconds.
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout_seconds: u64,
    /// Maximum decoded size of a single file chunk in bytes.
    #[serde(default = "default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            ping_interval_seconds: default_ping_interval(),
            ping_timeout_seconds: default_ping_timeout(),
            max_chunk_bytes: default_max_chunk_bytes(),
        }
    }
}

fn default_channel_buffer() -> usize {
    64
}

fn default_ping_interval() -> u64 {
    10
}

fn default_ping_timeout() -> u64 {
    5
}

// 5 MB, large enough for the chunk sizes the reference clients use.
fn default_max_chunk_bytes() -> usize {
    5_000_000
}
