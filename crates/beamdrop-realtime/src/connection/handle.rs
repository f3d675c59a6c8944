//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::warn;

use beamdrop_core::types::DeviceId;

use crate::message::types::OutboundMessage;

/// A handle to a single WebSocket connection.
///
/// Holds the sender side of the connection's outbound queue plus liveness
/// state. One device maps to exactly one handle for its whole lifetime.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Connection identity, minted at upgrade time.
    pub id: DeviceId,
    /// Sender for outbound messages.
    sender: mpsc::Sender<OutboundMessage>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Last pong received.
    pub last_pong: tokio::sync::RwLock<Instant>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
    /// Set when a roster broadcast could not be queued; the latest
    /// snapshot is redelivered on the connection's next inbound frame.
    roster_stale: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a new handle around an outbound queue.
    pub fn new(id: DeviceId, sender: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            id,
            sender,
            connected_at: Utc::now(),
            last_pong: tokio::sync::RwLock::new(Instant::now()),
            alive: AtomicBool::new(true),
            roster_stale: AtomicBool::new(false),
        }
    }

    /// Sends a message, waiting for queue capacity.
    ///
    /// Returns `false` when the connection is gone. Used for relayed
    /// traffic so a slow receiver backpressures the relay instead of
    /// losing chunks.
    pub async fn send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.send(msg).await {
            Ok(()) => true,
            Err(_) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Sends a message without waiting.
    ///
    /// A full queue drops the message with a warning. Used for roster
    /// broadcasts, where the next snapshot supersedes a lost one.
    pub fn try_send(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(device_id = %self.id, "Outbound queue full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Checks whether the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Records a pong response.
    pub async fn record_pong(&self) {
        let mut lp = self.last_pong.write().await;
        *lp = Instant::now();
    }

    /// Checks whether this connection missed a roster broadcast.
    pub fn roster_stale(&self) -> bool {
        self.roster_stale.load(Ordering::SeqCst)
    }

    /// Flags this connection as having missed a roster broadcast.
    pub fn mark_roster_stale(&self) {
        self.roster_stale.store(true, Ordering::SeqCst);
    }

    /// Clears the missed-roster flag after a successful delivery.
    pub fn clear_roster_stale(&self) {
        self.roster_stale.store(false, Ordering::SeqCst);
    }
}
