//! WebSocket message DTOs exchanged during the room handshake.

use serde::{Deserialize, Serialize};

/// Message type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Join,
    RoomReady,
    Error,
}

/// Sent by the client right after the transport opens to register presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomMessage {
    pub r#type: MessageType,
    pub room_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
}

/// Sent by the chat service once presence is registered in the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomReadyMessage {
    pub r#type: MessageType,
    pub room_id: String,
    /// Unix timestamp when the join was registered (milliseconds)
    pub joined_at: i64,
}

/// Sent by the chat service when the join is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}
