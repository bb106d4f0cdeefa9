//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use super::session::run_session;
use crate::app_state::AppState;
use crate::domain::RoomId;
use crate::error::GatewayError;

/// `GET /api/v1/ws/{room_id}` — Upgrade HTTP connection to a room session.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRoomId`] for a malformed identifier, and
/// [`GatewayError::RoomNotFound`] for an unknown room when on-demand
/// creation is disabled. Both are answered before the upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(raw_room_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, GatewayError> {
    let room_id = RoomId::parse(&raw_room_id)?;

    if !state.session.create_missing_rooms && state.store.load(&room_id).await?.is_none() {
        tracing::warn!(%room_id, "websocket rejected for unknown room");
        return Err(GatewayError::RoomNotFound(room_id.to_string()));
    }

    Ok(ws
        .on_upgrade(move |socket| run_session(socket, room_id, state))
        .into_response())
}
