//! Ping/pong heartbeat for WebSocket keepalive.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time;
use tracing::{debug, warn};

use beamdrop_core::config::realtime::RealtimeConfig;

use crate::message::types::OutboundMessage;

use super::handle::ConnectionHandle;

/// Heartbeat configuration.
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Interval between pings.
    pub ping_interval: Duration,
    /// Timeout before considering the connection dead.
    pub ping_timeout: Duration,
}

impl HeartbeatConfig {
    /// Derives heartbeat timing from the realtime configuration.
    pub fn from_realtime(config: &RealtimeConfig) -> Self {
        Self {
            ping_interval: Duration::from_secs(config.ping_interval_seconds),
            ping_timeout: Duration::from_secs(config.ping_timeout_seconds),
        }
    }
}

/// Runs the heartbeat loop for one connection.
///
/// Sends periodic pings and checks for pong responses. Marks the
/// connection dead if a pong does not arrive within the timeout.
pub async fn run_heartbeat(handle: Arc<ConnectionHandle>, config: HeartbeatConfig) {
    let mut interval = time::interval(config.ping_interval);
    // The first tick fires immediately; skip it so the client gets a
    // grace period equal to one full interval.
    interval.tick().await;

    loop {
        interval.tick().await;

        if !handle.is_alive() {
            break;
        }

        let last_pong = *handle.last_pong.read().await;
        let elapsed = last_pong.elapsed();

        if elapsed > config.ping_interval + config.ping_timeout {
            warn!(
                device_id = %handle.id,
                elapsed = ?elapsed,
                "Heartbeat timeout, marking connection dead"
            );
            handle.mark_dead();
            break;
        }

        let ping = OutboundMessage::Ping {
            timestamp: Utc::now().timestamp_millis(),
        };

        if !handle.try_send(ping) && !handle.is_alive() {
            break;
        }
    }

    debug!(device_id = %handle.id, "Heartbeat loop ended");
}
