//! ドメイン層
//!
//! 接続レコードのエンティティ・値オブジェクト・状態遷移ルールと、
//! データアクセス（Store）・ハンドシェイク・変更監視の各ポートを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

mod entity;
mod error;
mod handshake;
pub mod link;
mod repository;
mod value_object;
mod watcher;

pub use entity::{ConnectionRecord, ConnectionStatus};
pub use error::{ConnectionStateError, HandshakeError, StoreError, ValidationError};
pub use handshake::{HandshakeRequest, RoomHandshake};
pub use repository::ConnectionStore;
pub use value_object::{
    ConnectionId, ConnectionIdFactory, RoomId, RoomIdFactory, Timestamp, UserId, UserIdentity,
};
pub use watcher::{ConnectionSnapshot, ConnectionWatcherHub, WatcherChannel, WatcherId};

#[cfg(test)]
pub use handshake::MockRoomHandshake;
