//! Fan-out of room edits to every other member.
//!
//! [`BroadcastHub`] delivers one payload to all peers in a room except the
//! sender, under that room's lock. Delivery to each recipient is
//! independent; recipients whose queue is closed or full are evicted from
//! the [`RoomRegistry`] in the same critical section, which drops their
//! queue and ends their session.

use std::sync::Arc;

use super::{PeerId, RoomId, RoomRegistry};

/// Outcome of one [`BroadcastHub::broadcast`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of peers the payload was queued for.
    pub delivered: usize,
    /// Peers removed from the room because delivery failed.
    pub evicted: Vec<PeerId>,
}

/// Room-scoped broadcaster.
///
/// Cheap to clone; all clones share the same [`RoomRegistry`]. The hub
/// never inspects payloads.
///
/// # Ordering
///
/// Each recipient has a FIFO queue and a sender's edits are broadcast one
/// at a time, so every recipient sees one sender's edits in the order they
/// were received.
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    registry: Arc<RoomRegistry>,
}

impl BroadcastHub {
    /// Creates a hub over the given registry.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Delivers `payload` to every member of `room_id` except `sender`.
    ///
    /// Failures are per recipient and never surface to the caller beyond
    /// the returned report.
    pub async fn broadcast(
        &self,
        room_id: &RoomId,
        sender: PeerId,
        payload: &str,
    ) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let Some(mut room) = self.registry.lock_room(room_id).await else {
            return report;
        };

        for handle in room.peers() {
            if handle.id() == sender {
                continue;
            }
            match handle.deliver(payload.to_owned()) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    tracing::warn!(
                        %room_id,
                        peer_id = %handle.id(),
                        error = %err,
                        "evicting unreachable peer"
                    );
                    report.evicted.push(handle.id());
                }
            }
        }

        for peer_id in &report.evicted {
            room.evict(*peer_id);
        }
        self.registry.release(room).await;
        report
    }
}
