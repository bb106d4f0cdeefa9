//! Per-connection session lifecycle.
//!
//! One session runs per accepted WebSocket, scoped to a single room:
//!
//! 1. **Syncing**: load the room's text and join the registry with it
//!    queued as the first outbound message.
//! 2. **Active**: relay inbound edits (persist, then broadcast) and drain
//!    the peer's outbound queue into the socket.
//! 3. **Closing**: leave the registry exactly once, then release the socket.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, close_code};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::membership::Membership;
use crate::app_state::AppState;
use crate::domain::{PeerHandle, PeerId, RoomId};

/// Why a session left the Active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The client sent a close frame or the stream ended.
    ClientClosed,
    /// Reading from or writing to the socket failed or timed out.
    TransportError,
    /// The broadcast hub dropped this peer's queue.
    Evicted,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClientClosed => "client_closed",
            Self::TransportError => "transport_error",
            Self::Evicted => "evicted",
        };
        f.write_str(s)
    }
}

type WsSink = SplitSink<WebSocket, Message>;

/// Runs a session for one upgraded socket until it closes.
pub async fn run_session(socket: WebSocket, room_id: RoomId, state: AppState) {
    let settings = state.session;
    let (handle, outbound) = PeerHandle::channel(settings.queue_capacity);
    let peer_id = handle.id();
    let (mut ws_tx, ws_rx) = socket.split();

    let joined = state
        .registry
        .join_synced(&room_id, handle, state.sync.initial_text(&room_id))
        .await;
    if let Err(err) = joined {
        tracing::warn!(%room_id, %peer_id, error = %err, "initial sync failed");
        send_close(
            &mut ws_tx,
            close_code::ERROR,
            "initial sync failed",
            settings.send_timeout,
        )
        .await;
        return;
    }
    let membership = Membership::new(Arc::clone(&state.registry), room_id.clone(), peer_id);
    tracing::info!(%room_id, %peer_id, "peer connected");

    let reason = relay(&state, &room_id, peer_id, &mut ws_tx, ws_rx, outbound).await;

    membership.release().await;
    if reason == ExitReason::Evicted {
        send_close(
            &mut ws_tx,
            close_code::AGAIN,
            "evicted",
            settings.send_timeout,
        )
        .await;
    }
    tracing::info!(%room_id, %peer_id, %reason, "peer disconnected");
}

/// The Active state: returns once the transport ends or the peer is evicted.
async fn relay(
    state: &AppState,
    room_id: &RoomId,
    peer_id: PeerId,
    ws_tx: &mut WsSink,
    mut ws_rx: futures_util::stream::SplitStream<WebSocket>,
    mut outbound: mpsc::Receiver<String>,
) -> ExitReason {
    let send_timeout = state.session.send_timeout;
    loop {
        tokio::select! {
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        // An evicted peer is no longer a member; its edits go nowhere.
                        if outbound.is_closed() {
                            return ExitReason::Evicted;
                        }
                        handle_edit(state, room_id, peer_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => return ExitReason::ClientClosed,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!(%room_id, %peer_id, error = %err, "ws receive failed");
                        return ExitReason::TransportError;
                    }
                }
            }
            queued = outbound.recv() => {
                let Some(payload) = queued else {
                    return ExitReason::Evicted;
                };
                match tokio::time::timeout(send_timeout, ws_tx.send(Message::text(payload))).await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        tracing::debug!(%room_id, %peer_id, error = %err, "ws send failed");
                        return ExitReason::TransportError;
                    }
                    Err(_) => {
                        tracing::warn!(
                            %room_id,
                            %peer_id,
                            timeout = ?send_timeout,
                            "ws send timed out"
                        );
                        return ExitReason::TransportError;
                    }
                }
            }
        }
    }
}

/// Persists one inbound edit and fans it out.
///
/// A failed write is logged and the edit is still broadcast, so live peers
/// stay in step through a storage outage.
async fn handle_edit(state: &AppState, room_id: &RoomId, peer_id: PeerId, text: &str) {
    if let Err(err) = state.sync.apply(room_id, text).await {
        tracing::warn!(%room_id, %peer_id, error = %err, "failed to persist edit");
    }
    let report = state.hub.broadcast(room_id, peer_id, text).await;
    tracing::debug!(
        %room_id,
        %peer_id,
        delivered = report.delivered,
        evicted = report.evicted.len(),
        "edit relayed"
    );
}

async fn send_close(ws_tx: &mut WsSink, code: u16, reason: &'static str, limit: Duration) {
    let frame = CloseFrame {
        code,
        reason: Utf8Bytes::from_static(reason),
    };
    let _ = tokio::time::timeout(limit, ws_tx.send(Message::Close(Some(frame)))).await;
}
