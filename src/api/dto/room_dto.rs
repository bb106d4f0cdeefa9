//! Room DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RoomId;

/// Response body for `POST /api/v1/rooms`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    /// Identifier of the newly created room.
    #[schema(value_type = String, example = "a1b2c3d4")]
    pub room_id: RoomId,
}

/// Response body for `GET /api/v1/rooms/{room_id}/members`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomMembersResponse {
    /// Room identifier echoed from the path.
    #[schema(value_type = String)]
    pub room_id: RoomId,
    /// Number of peers currently connected to the room.
    pub members: usize,
}
