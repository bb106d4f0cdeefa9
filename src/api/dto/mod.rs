//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire to match the browser client.

pub mod autocomplete_dto;
pub mod room_dto;
pub mod system_dto;

pub use autocomplete_dto::*;
pub use room_dto::*;
pub use system_dto::*;
