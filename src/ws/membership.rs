//! Registry membership tied to a session's lifetime.

use std::sync::Arc;

use crate::domain::{PeerId, RoomId, RoomRegistry};

/// Proof that a peer is registered in a room.
///
/// [`Membership::release`] leaves the room. If the owning task unwinds or
/// is cancelled before releasing, `Drop` spawns the leave instead, so no
/// exit path keeps a stale registry entry.
#[derive(Debug)]
pub struct Membership {
    registry: Arc<RoomRegistry>,
    room_id: RoomId,
    peer_id: PeerId,
    released: bool,
}

impl Membership {
    /// Wraps an existing registration.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>, room_id: RoomId, peer_id: PeerId) -> Self {
        Self {
            registry,
            room_id,
            peer_id,
            released: false,
        }
    }

    /// Leaves the room.
    pub async fn release(mut self) {
        self.registry.leave(&self.room_id, self.peer_id).await;
        self.released = true;
    }
}

impl Drop for Membership {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(
                room_id = %self.room_id,
                peer_id = %self.peer_id,
                "membership dropped outside runtime"
            );
            return;
        };
        let registry = Arc::clone(&self.registry);
        let room_id = self.room_id.clone();
        let peer_id = self.peer_id;
        runtime.spawn(async move {
            registry.leave(&room_id, peer_id).await;
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PeerHandle;

    #[tokio::test]
    async fn release_leaves_room() {
        let registry = Arc::new(RoomRegistry::new());
        let room_id = RoomId::generate();
        let (handle, _rx) = PeerHandle::channel(4);
        let peer_id = handle.id();
        registry.join(&room_id, handle).await;

        Membership::new(Arc::clone(&registry), room_id.clone(), peer_id)
            .release()
            .await;
        assert!(registry.members_of(&room_id).await.is_empty());
    }

    #[tokio::test]
    async fn drop_without_release_still_leaves() {
        let registry = Arc::new(RoomRegistry::new());
        let room_id = RoomId::generate();
        let (handle, _rx) = PeerHandle::channel(4);
        let peer_id = handle.id();
        registry.join(&room_id, handle).await;

        drop(Membership::new(Arc::clone(&registry), room_id.clone(), peer_id));

        for _ in 0..100 {
            if registry.members_of(&room_id).await.is_empty() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("dropped membership was not cleaned up");
    }
}
