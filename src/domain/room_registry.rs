//! Room membership with per-room fine-grained locking.
//!
//! [`RoomRegistry`] maps each [`RoomId`] to the set of [`PeerHandle`]s
//! currently joined to it. The outer map sits behind a
//! [`tokio::sync::RwLock`]; every room's member set has its own
//! [`tokio::sync::Mutex`], which is the serialization point for joins,
//! leaves, and broadcasts in that room. Rooms never contend with each
//! other except for the brief outer-map access.
//!
//! # Lock order
//!
//! Outer map, then room. The outer lock is always released before a room
//! lock is awaited, and is only re-taken (for pruning) after the room lock
//! has been dropped.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::{PeerHandle, PeerId, RoomId};
use crate::error::GatewayError;

/// Member set of a single room.
#[derive(Debug, Default)]
pub(crate) struct RoomMembers {
    peers: HashMap<PeerId, PeerHandle>,
    /// Set once the room emptied and is being pruned. A retired set is
    /// never joined again; joiners go back to the map for a fresh one.
    retired: bool,
}

impl RoomMembers {
    fn retire_if_empty(&mut self) -> bool {
        if !self.retired && self.peers.is_empty() {
            self.retired = true;
            return true;
        }
        false
    }
}

/// Exclusive access to one room's member set.
///
/// Handed out by [`RoomRegistry::lock_room`] and given back through
/// [`RoomRegistry::release`], which prunes the room if it emptied.
#[derive(Debug)]
pub(crate) struct RoomGuard {
    room_id: RoomId,
    slot: Arc<Mutex<RoomMembers>>,
    members: OwnedMutexGuard<RoomMembers>,
}

impl RoomGuard {
    /// Iterates the handles currently in the room.
    pub(crate) fn peers(&self) -> impl Iterator<Item = &PeerHandle> {
        self.members.peers.values()
    }

    /// Removes a handle, dropping its outbound queue.
    pub(crate) fn evict(&mut self, peer_id: PeerId) -> bool {
        self.members.peers.remove(&peer_id).is_some()
    }
}

/// Process-wide record of which peers are connected to which room.
///
/// Constructed once at startup and shared through [`crate::app_state::AppState`].
/// Owns every mutation of membership.
///
/// # Concurrency
///
/// - Joins, leaves, and broadcasts in the same room are serialized.
/// - Operations on different rooms proceed concurrently.
/// - A room whose last member leaves is pruned from the map. The room itself
///   stays in the store; pruning only releases memory.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Arc<Mutex<RoomMembers>>>>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Adds `handle` to the room, creating the member set if absent.
    ///
    /// Returns `false` if a handle with the same peer id was already
    /// present, in which case the registry is left untouched.
    pub async fn join(&self, room_id: &RoomId, handle: PeerHandle) -> bool {
        let mut room = self.lock_or_create(room_id).await;
        let inserted = match room.members.peers.entry(handle.id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(handle);
                true
            }
        };
        self.release(room).await;
        if inserted {
            tracing::debug!(%room_id, "peer joined");
        }
        inserted
    }

    /// Joins a room after seeding the peer with the room's current text.
    ///
    /// `initial` is awaited while the room lock is held, its text is queued
    /// on `handle`, and only then is the handle inserted. Every broadcast in
    /// the room therefore reaches the peer after its initial state, and no
    /// edit persisted after the load can slip past it.
    ///
    /// # Errors
    ///
    /// Propagates the error from `initial`, or [`GatewayError::Delivery`]
    /// if the initial text cannot be queued. The handle is not registered
    /// in either case.
    pub async fn join_synced<F>(
        &self,
        room_id: &RoomId,
        handle: PeerHandle,
        initial: F,
    ) -> Result<(), GatewayError>
    where
        F: Future<Output = Result<String, GatewayError>>,
    {
        let mut room = self.lock_or_create(room_id).await;
        let outcome = match initial.await {
            Ok(text) => handle.deliver(text).map_err(GatewayError::from),
            Err(err) => Err(err),
        };
        if outcome.is_ok() {
            room.members.peers.entry(handle.id()).or_insert(handle);
            tracing::debug!(%room_id, "peer joined with initial state");
        }
        self.release(room).await;
        outcome
    }

    /// Removes a peer from the room. Idempotent.
    ///
    /// Returns `true` if the peer was a member.
    pub async fn leave(&self, room_id: &RoomId, peer_id: PeerId) -> bool {
        let Some(mut room) = self.lock_room(room_id).await else {
            return false;
        };
        let removed = room.evict(peer_id);
        self.release(room).await;
        if removed {
            tracing::debug!(%room_id, %peer_id, "peer left");
        }
        removed
    }

    /// Returns a point-in-time snapshot of the peers in a room.
    ///
    /// Taken under the room lock, so it never interleaves with a join,
    /// leave, or broadcast in the same room.
    pub async fn members_of(&self, room_id: &RoomId) -> Vec<PeerId> {
        let Some(room) = self.lock_room(room_id).await else {
            return Vec::new();
        };
        let ids = room.peers().map(PeerHandle::id).collect();
        self.release(room).await;
        ids
    }

    /// Returns the number of rooms with at least one member.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Returns `true` if no room has members.
    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }

    /// Locks an existing room. Returns `None` if the room has no members.
    pub(crate) async fn lock_room(&self, room_id: &RoomId) -> Option<RoomGuard> {
        let slot = {
            let map = self.rooms.read().await;
            Arc::clone(map.get(room_id)?)
        };
        let members = Arc::clone(&slot).lock_owned().await;
        // A retired set is empty and about to leave the map; treat it as gone.
        if members.retired {
            return None;
        }
        Some(RoomGuard {
            room_id: room_id.clone(),
            slot,
            members,
        })
    }

    /// Returns a room's lock, pruning the room if it has emptied.
    pub(crate) async fn release(&self, mut room: RoomGuard) {
        let emptied = room.members.retire_if_empty();
        let RoomGuard { room_id, slot, members } = room;
        drop(members);
        if emptied {
            let mut map = self.rooms.write().await;
            if map
                .get(&room_id)
                .is_some_and(|current| Arc::ptr_eq(current, &slot))
            {
                map.remove(&room_id);
                tracing::debug!(%room_id, "pruned empty room");
            }
        }
    }

    /// Locks a room, creating its member set if needed.
    ///
    /// Retries when it lands on a set that is being pruned.
    async fn lock_or_create(&self, room_id: &RoomId) -> RoomGuard {
        loop {
            let existing = {
                let map = self.rooms.read().await;
                map.get(room_id).map(Arc::clone)
            };
            let slot = match existing {
                Some(slot) => slot,
                None => {
                    let mut map = self.rooms.write().await;
                    Arc::clone(map.entry(room_id.clone()).or_default())
                }
            };
            let members = Arc::clone(&slot).lock_owned().await;
            if !members.retired {
                return RoomGuard {
                    room_id: room_id.clone(),
                    slot,
                    members,
                };
            }
            drop(members);
            tokio::task::yield_now().await;
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
