//! WebSocket layer: upgrade handling and per-connection sessions.
//!
//! `GET /api/v1/ws/{room_id}` upgrades into a session that keeps one peer
//! in sync with its room. Payloads are the full buffer text in both
//! directions, with no envelope.

pub mod handler;
pub mod membership;
pub mod session;
