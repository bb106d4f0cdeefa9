//! Room handlers: creation and live membership.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateRoomResponse, RoomMembersResponse};
use crate::app_state::AppState;
use crate::domain::RoomId;
use crate::error::{ErrorResponse, GatewayError};

/// Request headers echoed into the access log on room creation.
const LOGGED_HEADERS: [&str; 2] = ["x-username", "x-usermail"];

/// `POST /rooms` — Create a new, empty room.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] if the room cannot be stored.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    summary = "Create a room",
    description = "Generates a short room identifier and stores an empty buffer under it.",
    responses(
        (status = 200, description = "Room created", body = CreateRoomResponse),
        (status = 503, description = "Room store unavailable", body = ErrorResponse),
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CreateRoomResponse>, GatewayError> {
    let [username, usermail] = LOGGED_HEADERS.map(|name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("N/A")
            .to_string()
    });
    tracing::info!(x_username = %username, x_usermail = %usermail, "create room requested");

    let room_id = RoomId::generate();
    state.store.create(&room_id).await?;
    tracing::info!(%room_id, "room created");

    Ok(Json(CreateRoomResponse { room_id }))
}

/// `GET /rooms/{room_id}/members` — Count peers connected to a room.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRoomId`] for a malformed identifier.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}/members",
    tag = "Rooms",
    summary = "Live member count",
    description = "Returns how many peers are currently connected to the room on this node.",
    params(("room_id" = String, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Current membership", body = RoomMembersResponse),
        (status = 400, description = "Malformed room identifier", body = ErrorResponse),
    )
)]
pub async fn room_members(
    State(state): State<AppState>,
    Path(raw_room_id): Path<String>,
) -> Result<Json<RoomMembersResponse>, GatewayError> {
    let room_id = RoomId::parse(&raw_room_id)?;
    let members = state.registry.members_of(&room_id).await.len();
    Ok(Json(RoomMembersResponse { room_id, members }))
}

/// Room routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/{room_id}/members", get(room_members))
}
