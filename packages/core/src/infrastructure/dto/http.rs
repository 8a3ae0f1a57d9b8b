//! HTTP API DTOs for room management on the chat backend.

use serde::{Deserialize, Serialize};

/// Request body for creating a chat room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room_id: String,
    pub user_id: String,
}

/// Response body returned once a chat room exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
    /// Unix timestamp when the room was created (milliseconds)
    pub created_at: i64,
}
