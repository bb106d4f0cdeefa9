//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::SessionSettings;
use crate::domain::{BroadcastHub, RoomRegistry};
use crate::persistence::RoomStore;
use crate::service::{LastWriteWins, SyncPolicy};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once at startup; the registry inside lives as long as the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Room membership shared by every session.
    pub registry: Arc<RoomRegistry>,
    /// Fan-out over [`Self::registry`].
    pub hub: BroadcastHub,
    /// Authoritative text policy.
    pub sync: Arc<dyn SyncPolicy>,
    /// Backing store, used directly by REST handlers.
    pub store: Arc<dyn RoomStore>,
    /// Per-connection tuning.
    pub session: SessionSettings,
    /// Service name reported by `GET /`.
    pub project_name: String,
}

impl AppState {
    /// Wires a fresh registry, hub, and last-write-wins policy over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RoomStore>, session: SessionSettings, project_name: String) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let hub = BroadcastHub::new(Arc::clone(&registry));
        let sync: Arc<dyn SyncPolicy> = Arc::new(LastWriteWins::new(
            Arc::clone(&store),
            session.create_missing_rooms,
        ));
        Self {
            registry,
            hub,
            sync,
            store,
            session,
            project_name,
        }
    }
}
