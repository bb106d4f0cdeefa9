//! Domain layer: identifiers, rooms, peer handles, membership, and fan-out.
//!
//! This module contains the server-side model of the synchronization
//! engine: the [`RoomRegistry`] that owns room membership, the
//! [`BroadcastHub`] that fans edits out to a room, and the value types
//! they operate on.

pub mod broadcast_hub;
pub mod peer;
pub mod room;
pub mod room_id;
pub mod room_registry;

pub use broadcast_hub::{BroadcastHub, BroadcastReport};
pub use peer::PeerHandle;
pub use room::Room;
pub use room_id::{PeerId, RoomId};
pub use room_registry::RoomRegistry;
