//! codepair-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use codepair_gateway::api;
use codepair_gateway::app_state::AppState;
use codepair_gateway::config::{GatewayConfig, LogFormat, StoreBackend};
use codepair_gateway::persistence::{InMemoryRoomStore, PostgresRoomStore, RoomStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, project = %config.project_name, "starting codepair-gateway");

    // Build persistence layer
    let store: Arc<dyn RoomStore> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory room store; rooms are lost on restart");
            Arc::new(InMemoryRoomStore::new())
        }
        StoreBackend::Postgres => Arc::new(PostgresRoomStore::connect(&config).await?),
    };

    // Build application state
    let app_state = AppState::new(
        store,
        config.session_settings(),
        config.project_name.clone(),
    );
    let registry = Arc::clone(&app_state.registry);

    // Build router
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(open_rooms = registry.room_count().await, "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
