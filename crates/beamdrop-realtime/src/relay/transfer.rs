//! Transfer relay.
//!
//! Forwards `start-transfer`, `file-chunk`, and `transfer-complete`
//! events to the target device's receive room. The server keeps no
//! per-transfer state: each event is looked up, forwarded, and forgotten.
//! Unknown or unjoined targets are dropped silently — the permissive
//! policy of the protocol — but the typed [`RelayOutcome`] lets callers
//! and tests observe what happened.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use beamdrop_core::types::DeviceId;

use crate::message::types::OutboundMessage;
use crate::message::validator;
use crate::room::directory::RoomDirectory;

/// Result of a single relay operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The event was forwarded to the target's channel.
    Forwarded,
    /// No joined receive room exists for the target; the event was dropped.
    UnknownTarget,
    /// The payload failed validation; the event was dropped and must not
    /// be acknowledged.
    Rejected,
}

/// Relays transfer lifecycle events between connections.
#[derive(Debug)]
pub struct TransferRelay {
    /// Joined receive rooms, used for target lookup.
    rooms: Arc<RoomDirectory>,
    /// Maximum decoded chunk size in bytes.
    max_chunk_bytes: usize,
}

impl TransferRelay {
    /// Creates a relay over the given room directory.
    pub fn new(rooms: Arc<RoomDirectory>, max_chunk_bytes: usize) -> Self {
        Self {
            rooms,
            max_chunk_bytes,
        }
    }

    /// Announces an incoming transfer to the target device.
    pub async fn start_transfer(
        &self,
        sender_id: DeviceId,
        target_id: DeviceId,
        file_name: String,
        file_size: u64,
    ) -> RelayOutcome {
        let target = match self.rooms.lookup(&target_id) {
            Some(handle) => handle,
            None => {
                debug!(
                    sender_id = %sender_id,
                    target_id = %target_id,
                    "Dropping start-transfer to unknown target"
                );
                return RelayOutcome::UnknownTarget;
            }
        };

        debug!(
            sender_id = %sender_id,
            target_id = %target_id,
            file_name = %file_name,
            file_size,
            "Relaying transfer start"
        );

        let forwarded = target
            .send(OutboundMessage::IncomingTransfer {
                sender_id,
                file_name,
                file_size,
            })
            .await;

        if forwarded {
            RelayOutcome::Forwarded
        } else {
            RelayOutcome::UnknownTarget
        }
    }

    /// Relays one chunk to the target device.
    ///
    /// The chunk payload is validated before forwarding; a malformed chunk
    /// is dropped and reported as [`RelayOutcome::Rejected`], which is the
    /// only outcome that withholds the sender's acknowledgement. The
    /// `chunk, index, totalChunks` triple is forwarded exactly as
    /// received.
    pub async fn relay_chunk(
        &self,
        sender_id: DeviceId,
        target_id: DeviceId,
        chunk: String,
        index: u32,
        total_chunks: u32,
    ) -> RelayOutcome {
        if let Err(e) = validator::validate_chunk(&chunk, self.max_chunk_bytes) {
            warn!(
                sender_id = %sender_id,
                target_id = %target_id,
                index,
                error = %e,
                "Dropping malformed chunk"
            );
            return RelayOutcome::Rejected;
        }

        let target = match self.rooms.lookup(&target_id) {
            Some(handle) => handle,
            None => {
                debug!(
                    sender_id = %sender_id,
                    target_id = %target_id,
                    index,
                    "Dropping chunk to unknown target"
                );
                return RelayOutcome::UnknownTarget;
            }
        };

        trace!(
            sender_id = %sender_id,
            target_id = %target_id,
            index,
            total_chunks,
            "Relaying chunk"
        );

        let forwarded = target
            .send(OutboundMessage::ReceiveChunk {
                chunk,
                index,
                total_chunks,
            })
            .await;

        if forwarded {
            RelayOutcome::Forwarded
        } else {
            RelayOutcome::UnknownTarget
        }
    }

    /// Signals transfer completion to the target device.
    ///
    /// Forwarded verbatim; the relay never verifies that all announced
    /// chunks actually passed through.
    pub async fn complete_transfer(
        &self,
        sender_id: DeviceId,
        target_id: DeviceId,
    ) -> RelayOutcome {
        let target = match self.rooms.lookup(&target_id) {
            Some(handle) => handle,
            None => {
                debug!(
                    sender_id = %sender_id,
                    target_id = %target_id,
                    "Dropping transfer-complete to unknown target"
                );
                return RelayOutcome::UnknownTarget;
            }
        };

        debug!(sender_id = %sender_id, target_id = %target_id, "Relaying transfer completion");

        if target.send(OutboundMessage::TransferComplete).await {
            RelayOutcome::Forwarded
        } else {
            RelayOutcome::UnknownTarget
        }
    }
}
