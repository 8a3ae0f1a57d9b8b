//! ハンドシェイクのポート定義
//!
//! リモートのチャットサービスとのセッション確立（認証 → ルーム作成/参加 →
//! トランスポート確立 → プレゼンス登録）を 1 つの非同期操作として抽象化
//! します。結果は「成功」か「失敗」の 2 値のみで、レコードの遷移と通知の
//! 順序は UseCase 層が制御します。

use async_trait::async_trait;

use super::error::HandshakeError;
use super::value_object::{RoomId, UserIdentity};

/// ハンドシェイクに渡すリクエスト
#[derive(Debug, Clone)]
pub struct HandshakeRequest {
    /// 参加先のルーム ID
    pub room_id: RoomId,
    /// 接続するユーザーの身元スナップショット
    pub identity: UserIdentity,
    /// ルームを新規作成するか（`false` なら既存ルームへ参加）
    pub create_new_room: bool,
}

/// ハンドシェイクのポート
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomHandshake: Send + Sync {
    /// リモートのチャットセッション確立を試みる
    async fn establish(&self, request: &HandshakeRequest) -> Result<(), HandshakeError>;
}
