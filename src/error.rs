//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! [`DeliveryError`] is the narrower failure reported when a payload cannot
//! be queued for one peer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "room not found: a1b2c3d4",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure to hand a payload to a single peer.
///
/// Never escalated to the sender of a broadcast; the hub evicts the
/// recipient instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The peer's session has already gone away.
    #[error("peer queue closed")]
    Closed,

    /// The peer is not draining its queue fast enough.
    #[error("peer queue full")]
    Full,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request           |
/// | 2000–2999 | State/Not Found | 404 Not Found             |
/// | 3000–3999 | Server          | 500 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Room identifier is empty, too long, or has forbidden characters.
    #[error("invalid room id: {0}")]
    InvalidRoomId(String),

    /// Request body could not be parsed or validated.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Room with the given ID does not exist in the store.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// Room store failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// A payload could not be delivered to a peer.
    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidRoomId(_) => 1002,
            Self::RoomNotFound(_) => 2001,
            Self::PersistenceError(_) => 3001,
            Self::Delivery(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidRoomId(_) => StatusCode::BAD_REQUEST,
            Self::RoomNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
