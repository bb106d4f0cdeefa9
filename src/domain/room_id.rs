//! Room and peer identifiers.
//!
//! [`RoomId`] is the opaque string key shared by the registry, the store,
//! and the WebSocket route. [`PeerId`] tags one accepted connection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Longest room identifier accepted from clients.
pub const MAX_ROOM_ID_LEN: usize = 64;

/// Length of identifiers produced by [`RoomId::generate`].
const GENERATED_LEN: usize = 8;

/// Identifier of a shared text buffer.
///
/// Client-supplied identifiers are validated by [`RoomId::parse`]; the
/// server mints new ones with [`RoomId::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Generates a fresh 8-character identifier from a UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(GENERATED_LEN);
        Self(id)
    }

    /// Validates a client-supplied room identifier.
    ///
    /// Accepts 1 to [`MAX_ROOM_ID_LEN`] characters from `[A-Za-z0-9_-]`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRoomId`] when the input is empty, too
    /// long, or contains any other character.
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        if raw.is_empty() || raw.len() > MAX_ROOM_ID_LEN {
            return Err(GatewayError::InvalidRoomId(format!(
                "length must be 1..={MAX_ROOM_ID_LEN}"
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(GatewayError::InvalidRoomId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(uuid::Uuid);

impl PeerId {
    /// Creates a new random `PeerId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for PeerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_short_and_valid() {
        let id = RoomId::generate();
        assert_eq!(id.as_str().len(), 8);
        assert!(RoomId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(RoomId::generate(), RoomId::generate());
    }

    #[test]
    fn parse_accepts_legacy_ids() {
        let Ok(id) = RoomId::parse("ws_test-room_1") else {
            panic!("expected valid id");
        };
        assert_eq!(id.to_string(), "ws_test-room_1");
    }

    #[test]
    fn parse_rejects_empty_and_long() {
        assert!(RoomId::parse("").is_err());
        let long = "a".repeat(MAX_ROOM_ID_LEN + 1);
        assert!(RoomId::parse(&long).is_err());
        assert!(RoomId::parse(&"a".repeat(MAX_ROOM_ID_LEN)).is_ok());
    }

    #[test]
    fn parse_rejects_path_characters() {
        for raw in ["../etc", "a b", "room/1", "caf\u{e9}"] {
            assert!(RoomId::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn peer_ids_are_unique() {
        assert_ne!(PeerId::new(), PeerId::default());
    }

    #[test]
    fn serde_is_transparent() {
        let Ok(id) = RoomId::parse("abc") else {
            panic!("expected valid id");
        };
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"abc\"");
    }
}
