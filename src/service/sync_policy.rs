//! Rules for updating a room's authoritative text.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::RoomId;
use crate::error::GatewayError;
use crate::persistence::RoomStore;

/// How a room's authoritative text evolves and how late joiners catch up.
///
/// This is the seam for alternative synchronization schemes; sessions,
/// the registry, and the hub treat payloads as opaque text.
#[async_trait]
pub trait SyncPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the text a newly connected peer starts from.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RoomNotFound`] if the room is unknown and the
    /// policy does not create rooms on demand, or a persistence error.
    async fn initial_text(&self, room_id: &RoomId) -> Result<String, GatewayError>;

    /// Records `text` as the room's new authoritative content.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the write failed.
    async fn apply(&self, room_id: &RoomId, text: &str) -> Result<(), GatewayError>;
}

/// Whole-buffer last-write-wins.
///
/// Every edit replaces the room's text unconditionally, whoever sent it.
/// Two peers typing at once can overwrite each other; there is no merge.
#[derive(Debug, Clone)]
pub struct LastWriteWins {
    store: Arc<dyn RoomStore>,
    create_missing: bool,
}

impl LastWriteWins {
    /// Creates the policy over a room store.
    ///
    /// With `create_missing`, connecting to an unknown room creates it empty.
    #[must_use]
    pub fn new(store: Arc<dyn RoomStore>, create_missing: bool) -> Self {
        Self {
            store,
            create_missing,
        }
    }
}

#[async_trait]
impl SyncPolicy for LastWriteWins {
    async fn initial_text(&self, room_id: &RoomId) -> Result<String, GatewayError> {
        if let Some(room) = self.store.load(room_id).await? {
            return Ok(room.code_content);
        }
        if !self.create_missing {
            return Err(GatewayError::RoomNotFound(room_id.to_string()));
        }
        let room = self.store.create(room_id).await?;
        tracing::info!(%room_id, "created room on first connect");
        Ok(room.code_content)
    }

    async fn apply(&self, room_id: &RoomId, text: &str) -> Result<(), GatewayError> {
        self.store.save(room_id, text).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::persistence::InMemoryRoomStore;

    fn policy(create_missing: bool) -> LastWriteWins {
        LastWriteWins::new(Arc::new(InMemoryRoomStore::new()), create_missing)
    }

    #[tokio::test]
    async fn unknown_room_starts_blank_and_is_created() {
        let policy = policy(true);
        let id = RoomId::generate();

        let text = assert_ok!(policy.initial_text(&id).await);
        assert!(text.is_empty());
        assert!(assert_ok!(policy.store.load(&id).await).is_some());
    }

    #[tokio::test]
    async fn unknown_room_rejected_when_creation_disabled() {
        let policy = policy(false);
        let result = policy.initial_text(&RoomId::generate()).await;
        assert!(matches!(result, Err(GatewayError::RoomNotFound(_))));
    }

    #[tokio::test]
    async fn last_write_wins_regardless_of_author() {
        let policy = policy(true);
        let id = RoomId::generate();

        // E1 from peer A, then E2 from peer B.
        assert_ok!(policy.apply(&id, "print('from a')").await);
        assert_ok!(policy.apply(&id, "print('from b')").await);

        let text = assert_ok!(policy.initial_text(&id).await);
        assert_eq!(text, "print('from b')");
    }

    #[tokio::test]
    async fn late_joiner_sees_persisted_text() {
        let policy = policy(true);
        let id = RoomId::generate();
        assert_ok!(policy.initial_text(&id).await);
        assert_ok!(policy.apply(&id, "def foo():").await);

        assert_eq!(assert_ok!(policy.initial_text(&id).await), "def foo():");
    }
}
