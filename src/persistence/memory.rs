//! Process-local room store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RoomStore;
use crate::domain::{Room, RoomId};
use crate::error::GatewayError;

/// [`RoomStore`] kept in a `HashMap`. Contents do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryRoomStore {
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl InMemoryRoomStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn load(&self, room_id: &RoomId) -> Result<Option<Room>, GatewayError> {
        Ok(self.rooms.read().await.get(room_id).cloned())
    }

    async fn save(&self, room_id: &RoomId, text: &str) -> Result<(), GatewayError> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::empty(room_id.clone()))
            .overwrite(text);
        Ok(())
    }

    async fn create(&self, room_id: &RoomId) -> Result<Room, GatewayError> {
        let mut rooms = self.rooms.write().await;
        Ok(rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::empty(room_id.clone()))
            .clone())
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    #[tokio::test]
    async fn load_unknown_is_none() {
        let store = InMemoryRoomStore::new();
        let loaded = assert_ok!(store.load(&RoomId::generate()).await);
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let store = InMemoryRoomStore::new();
        let id = RoomId::generate();
        assert_ok!(store.save(&id, "keep me").await);

        let room = assert_ok!(store.create(&id).await);
        assert_eq!(room.code_content, "keep me");
        assert_eq!(store.rooms.read().await.len(), 1);
    }

    #[tokio::test]
    async fn save_overwrites() {
        let store = InMemoryRoomStore::new();
        let id = RoomId::generate();
        assert_ok!(store.create(&id).await);
        assert_ok!(store.save(&id, "def foo():").await);
        assert_ok!(store.save(&id, "def foo(): pass").await);

        let Some(room) = assert_ok!(store.load(&id).await) else {
            panic!("room should exist");
        };
        assert_eq!(room.code_content, "def foo(): pass");
    }

    #[tokio::test]
    async fn ping_always_succeeds() {
        assert_ok!(InMemoryRoomStore::new().ping().await);
    }
}
