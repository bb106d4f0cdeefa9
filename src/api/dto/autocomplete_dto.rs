//! Autocomplete DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/v1/autocomplete`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    /// Buffer content up to the cursor.
    pub code: String,
    /// Cursor offset within `code`.
    pub cursor_position: usize,
    /// Editor language mode (informational only).
    pub language: String,
}

/// Response body for `POST /api/v1/autocomplete`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AutocompleteResponse {
    /// Text to insert at the cursor.
    pub suggestion: String,
}
