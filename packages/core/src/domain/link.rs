//! Shareable link derivation.
//!
//! Pure functions deriving URLs from a room identifier. Both derivations are
//! deterministic in `(origin, room_id)` and usable without any stored
//! record, e.g. for sharing a room before or after a session is active.

use super::value_object::RoomId;

/// Build the dashboard-style URL embedding the room as a query parameter.
pub fn generate_connection_url(origin: &str, room_id: &RoomId) -> String {
    format!(
        "{}/dashboard/chat?room={}",
        normalize_origin(origin),
        room_id.as_str()
    )
}

/// Build the direct per-room chat URL.
pub fn generate_chat_link(origin: &str, room_id: &RoomId) -> String {
    format!("{}/chat/{}", normalize_origin(origin), room_id.as_str())
}

fn normalize_origin(origin: &str) -> &str {
    origin.trim_end_matches('/')
}
