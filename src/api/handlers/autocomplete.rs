//! Mock autocomplete endpoint.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{AutocompleteRequest, AutocompleteResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// Picks a canned suggestion from the text before the cursor.
#[must_use]
pub fn suggest(code: &str) -> &'static str {
    if code.ends_with("def ") {
        "function_name():\n    pass"
    } else if code.ends_with("class ") {
        "ClassName:\n    pass"
    } else {
        " # (Mock AI) Continue code..."
    }
}

/// `POST /autocomplete` — Return a canned completion.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if the body is missing or is
/// not a valid [`AutocompleteRequest`].
#[utoipa::path(
    post,
    path = "/api/v1/autocomplete",
    tag = "Editor",
    summary = "Mock completion",
    description = "Keyword-based placeholder completion; ignores language and cursor.",
    request_body = AutocompleteRequest,
    responses(
        (status = 200, description = "Suggested completion", body = AutocompleteResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
    )
)]
pub async fn autocomplete(
    payload: Result<Json<AutocompleteRequest>, JsonRejection>,
) -> Result<Json<AutocompleteResponse>, GatewayError> {
    let Json(req) =
        payload.map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
    tracing::debug!(language = %req.language, cursor = req.cursor_position, "autocomplete requested");
    Ok(Json(AutocompleteResponse {
        suggestion: suggest(&req.code).to_string(),
    }))
}

/// Autocomplete routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/autocomplete", post(autocomplete))
}
