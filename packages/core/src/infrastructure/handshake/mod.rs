//! ハンドシェイク実装

mod simulated;
mod websocket;

pub use simulated::SimulatedHandshake;
pub use websocket::WebSocketRoomHandshake;
