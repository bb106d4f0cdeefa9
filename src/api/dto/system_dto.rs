//! Liveness and health DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// Banner naming the running service.
    pub message: String,
}

/// Response body for `GET /api/v1/liveness`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    /// Always `"alive"`.
    pub status: String,
}

/// Response body for `GET /api/v1/health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"` or `"not ok"`.
    pub status: String,
    /// `"accessible"` or `"unreachable"`.
    pub database: String,
}
