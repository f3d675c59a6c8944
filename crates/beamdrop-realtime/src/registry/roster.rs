//! Roster broadcaster — pushes the full device list to every connection.

use std::sync::Arc;

use tracing::debug;

use crate::connection::handle::ConnectionHandle;
use crate::connection::pool::ConnectionPool;
use crate::message::types::OutboundMessage;

use super::registry::DeviceRegistry;

/// Broadcasts registry snapshots as `device-list` messages.
///
/// Called synchronously after every successful registry mutation so no
/// change goes unannounced. A connection whose outbound queue is full is
/// skipped but flagged stale; [`RosterBroadcaster::refresh`] redelivers
/// the latest snapshot once the connection shows signs of life, so every
/// live connection eventually observes the final roster state.
#[derive(Debug)]
pub struct RosterBroadcaster {
    /// All open connections.
    pool: Arc<ConnectionPool>,
}

impl RosterBroadcaster {
    /// Creates a broadcaster over the given connection pool.
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Sends the current roster to every pooled connection.
    ///
    /// Returns the number of connections the snapshot was delivered to.
    pub fn publish(&self, registry: &DeviceRegistry) -> usize {
        let devices = registry.snapshot();
        let message = OutboundMessage::DeviceList { devices };

        let mut delivered = 0;
        for handle in self.pool.all_connections() {
            if handle.try_send(message.clone()) {
                handle.clear_roster_stale();
                delivered += 1;
            } else if handle.is_alive() {
                handle.mark_roster_stale();
            }
        }

        debug!(
            devices = registry.len(),
            delivered, "Roster broadcast published"
        );
        delivered
    }

    /// Redelivers the current roster to a connection that missed an
    /// earlier broadcast.
    ///
    /// No-op for connections that are up to date. Returns `true` when the
    /// connection has the latest snapshot queued.
    pub fn refresh(&self, handle: &ConnectionHandle, registry: &DeviceRegistry) -> bool {
        if !handle.roster_stale() {
            return true;
        }

        let message = OutboundMessage::DeviceList {
            devices: registry.snapshot(),
        };
        if handle.try_send(message) {
            handle.clear_roster_stale();
            debug!(device_id = %handle.id, "Missed roster redelivered");
            true
        } else {
            false
        }
    }
}
