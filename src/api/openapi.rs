//! OpenAPI description of the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{
    AutocompleteRequest, AutocompleteResponse, CreateRoomResponse, HealthResponse,
    LivenessResponse, RoomMembersResponse, RootResponse,
};
use crate::api::handlers::{autocomplete, room, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "codepair-gateway", description = "Real-time collaborative editing rooms"),
    paths(
        system::root_handler,
        system::liveness_handler,
        system::health_handler,
        room::create_room,
        room::room_members,
        autocomplete::autocomplete,
    ),
    components(schemas(
        AutocompleteRequest,
        AutocompleteResponse,
        CreateRoomResponse,
        HealthResponse,
        LivenessResponse,
        RoomMembersResponse,
        RootResponse,
        ErrorBody,
        ErrorResponse,
    )),
    tags(
        (name = "System", description = "Liveness and health"),
        (name = "Rooms", description = "Room creation and membership"),
        (name = "Editor", description = "Editor helpers"),
    )
)]
pub struct ApiDoc;
