//! System endpoints: banner, liveness, and store health.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{HealthResponse, LivenessResponse, RootResponse};
use crate::app_state::AppState;

/// `GET /` — Service banner.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service is running", body = RootResponse),
    )
)]
pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(RootResponse {
        message: format!("{} is running", state.project_name),
    })
}

/// `GET /api/v1/liveness` — Process liveness.
#[utoipa::path(
    get,
    path = "/api/v1/liveness",
    tag = "System",
    summary = "Liveness probe",
    description = "Returns as long as the process is serving requests.",
    responses(
        (status = 200, description = "Process is alive", body = LivenessResponse),
    )
)]
pub async fn liveness_handler() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

/// `GET /api/v1/health` — Room store reachability.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "System",
    summary = "Health check",
    description = "Probes the room store. Returns 503 when it cannot be reached.",
    responses(
        (status = 200, description = "Store is accessible", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => {
            tracing::debug!("health check passed");
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "ok".to_string(),
                    database: "accessible".to_string(),
                }),
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "not ok".to_string(),
                    database: "unreachable".to_string(),
                }),
            )
        }
    }
}

/// Probe routes, nested under `/api/v1`.
pub fn probe_routes() -> Router<AppState> {
    Router::new()
        .route("/liveness", get(liveness_handler))
        .route("/health", get(health_handler))
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(root_handler))
}
