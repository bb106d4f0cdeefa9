//! Persistence layer: the room store.
//!
//! [`RoomStore`] is the narrow interface the engine uses to read and write
//! a room's authoritative text. The store owns its own concurrency
//! discipline; the engine never locks around it.
//!
//! Two implementations ship with the gateway: [`InMemoryRoomStore`] for
//! development and tests, and [`PostgresRoomStore`] backed by `sqlx`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

pub use memory::InMemoryRoomStore;
pub use postgres::PostgresRoomStore;

use crate::domain::{Room, RoomId};
use crate::error::GatewayError;

/// Durable storage for room text.
#[async_trait]
pub trait RoomStore: Send + Sync + std::fmt::Debug {
    /// Loads a room, or `None` if it was never created.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the backend fails.
    async fn load(&self, room_id: &RoomId) -> Result<Option<Room>, GatewayError>;

    /// Overwrites a room's text, creating the room if absent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the backend fails.
    async fn save(&self, room_id: &RoomId, text: &str) -> Result<(), GatewayError>;

    /// Creates an empty room if absent and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the backend fails.
    async fn create(&self, room_id: &RoomId) -> Result<Room, GatewayError>;

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the backend fails.
    async fn ping(&self) -> Result<(), GatewayError>;
}
