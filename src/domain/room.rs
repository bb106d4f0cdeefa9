//! Persisted room record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::RoomId;

/// A shared text buffer as held by the room store.
///
/// `code_content` is the authoritative text under last-write-wins: every
/// accepted edit replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Room identifier (immutable after creation).
    pub room_id: RoomId,

    /// Full current buffer content.
    pub code_content: String,

    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last accepted write.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Creates an empty room stamped with the current time.
    #[must_use]
    pub fn empty(room_id: RoomId) -> Self {
        let now = Utc::now();
        Self {
            room_id,
            code_content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the content and bumps `updated_at`.
    pub fn overwrite(&mut self, text: &str) {
        text.clone_into(&mut self.code_content);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_room_has_blank_content() {
        let room = Room::empty(RoomId::generate());
        assert!(room.code_content.is_empty());
        assert_eq!(room.created_at, room.updated_at);
    }

    #[test]
    fn overwrite_replaces_and_touches() {
        let mut room = Room::empty(RoomId::generate());
        room.overwrite("def foo():");
        room.overwrite("def foo(): pass");
        assert_eq!(room.code_content, "def foo(): pass");
        assert!(room.updated_at >= room.created_at);
    }
}
