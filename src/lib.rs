//! # codepair-gateway
//!
//! Real-time room synchronization for collaborative code editing.
//!
//! Clients join a room over WebSocket, receive the room's persisted text,
//! and then exchange full-buffer edits. Every edit is persisted under
//! last-write-wins and fanned out to the other peers in the room.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Session per connection (ws/)
//!     │
//!     ├── SyncPolicy: last-write-wins (service/)
//!     ├── BroadcastHub (domain/)
//!     │
//!     ├── RoomRegistry: per-room locked membership (domain/)
//!     │
//!     └── RoomStore: in-memory or PostgreSQL (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
