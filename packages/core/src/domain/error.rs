//! ドメイン層のエラー型定義
//!
//! 値オブジェクト・エンティティ・各ポートが返すエラーを定義します。
//! UseCase 層のエラー（`ConnectError`）はこれらを包んで呼び出し側へ伝搬します。

use thiserror::Error;

use super::entity::ConnectionStatus;

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// ユーザー ID が空
    #[error("user id must not be empty")]
    EmptyUserId,

    /// ユーザー ID が長すぎる
    #[error("user id must be at most {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// 接続 ID が空
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    /// ルーム ID が空
    #[error("room id must not be empty")]
    EmptyRoomId,
}

/// 接続ステータスの不正な遷移
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid status transition: {from} -> {to}")]
pub struct ConnectionStateError {
    /// 遷移元のステータス
    pub from: ConnectionStatus,
    /// 遷移先として要求されたステータス
    pub to: ConnectionStatus,
}

/// ハンドシェイク失敗
///
/// `connect` の呼び出し側へそのまま伝搬され、レコードは `error` 状態で
/// Store に残ります。
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// トランスポート層の障害（接続不可、切断など）
    #[error("transport error: {0}")]
    Transport(String),

    /// ルームの作成・参加に失敗
    #[error("room setup failed: {0}")]
    RoomSetup(String),

    /// チャットサービスに参加を拒否された
    #[error("connection rejected by chat service: {0}")]
    Rejected(String),

    /// 応答待ちがタイムアウトした
    #[error("handshake timed out after {0} seconds")]
    Timeout(u64),
}

/// Store 操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// 指定されたレコードが存在しない
    #[error("connection record '{0}' not found")]
    RecordNotFound(String),
}
