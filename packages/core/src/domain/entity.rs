//! 接続レコードのエンティティ定義
//!
//! チャットセッション 1 回分の試行を表す `ConnectionRecord` と、その
//! ステータス遷移ルールを定義します。遷移の合法性はエンティティ自身が
//! 保証し、UseCase 層は遷移の順序のみを制御します。

use std::fmt;

use super::error::ConnectionStateError;
use super::value_object::{ConnectionId, RoomId, Timestamp, UserIdentity};

/// 接続レコードのステータス
///
/// 許可される遷移:
/// - `connecting -> connected`（ハンドシェイク成功）
/// - `connecting -> error`（ハンドシェイク失敗）
/// - `connecting | connected | error -> disconnected`（明示的な切断）
///
/// `disconnected` は終端状態で、以降の遷移は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Error,
}

impl ConnectionStatus {
    /// この状態から `next` への遷移が許可されているか
    pub fn allows_transition_to(self, next: ConnectionStatus) -> bool {
        use ConnectionStatus::*;
        matches!(
            (self, next),
            (Connecting, Connected)
                | (Connecting, Error)
                | (Connecting, Disconnected)
                | (Connected, Disconnected)
                | (Error, Disconnected)
        )
    }

    /// 終端状態かどうか
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionStatus::Disconnected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// チャット接続 1 回分の試行を表すレコード
///
/// `id`・身元スナップショット・`room_id`・`connection_url`・`created_at` は
/// 作成時に確定し、以降は変更しない。可変なのは `status` と
/// `last_activity` のみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// 接続の一意な識別子
    pub id: ConnectionId,
    /// 作成時点のユーザー身元スナップショット
    pub identity: UserIdentity,
    /// 現在のステータス
    pub status: ConnectionStatus,
    /// 紐づくチャットルームの識別子
    pub room_id: RoomId,
    /// 共有用 URL（作成時に一度だけ導出）
    pub connection_url: String,
    /// 作成時刻
    pub created_at: Timestamp,
    /// 最終アクティビティ時刻
    pub last_activity: Timestamp,
}

impl ConnectionRecord {
    /// `connecting` 状態の新しいレコードを作成
    pub fn new(
        id: ConnectionId,
        identity: UserIdentity,
        room_id: RoomId,
        connection_url: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            identity,
            status: ConnectionStatus::Connecting,
            room_id,
            connection_url,
            created_at,
            last_activity: created_at,
        }
    }

    /// ステータスを遷移させる
    ///
    /// 許可されていない遷移は `ConnectionStateError` を返し、レコードは
    /// 変更されない。
    pub fn transition_to(
        &mut self,
        next: ConnectionStatus,
        now: Timestamp,
    ) -> Result<(), ConnectionStateError> {
        if !self.status.allows_transition_to(next) {
            return Err(ConnectionStateError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.last_activity = now;
        Ok(())
    }

    /// ハンドシェイク結果を適用する
    ///
    /// レコードがまだ `connecting` の場合のみ `connected` / `error` へ
    /// 遷移させ `true` を返す。ハンドシェイク中に閉じられていた場合は
    /// 何もせず `false` を返す（stale な結果の破棄）。
    pub fn resolve_handshake(&mut self, success: bool, now: Timestamp) -> bool {
        if self.status != ConnectionStatus::Connecting {
            return false;
        }
        self.status = if success {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Error
        };
        self.last_activity = now;
        true
    }

    /// レコードを切断済みにする
    ///
    /// 既に終端状態の場合は何もせず `false` を返す（冪等）。
    pub fn mark_disconnected(&mut self, now: Timestamp) -> bool {
        if !self.status.allows_transition_to(ConnectionStatus::Disconnected) {
            return false;
        }
        self.status = ConnectionStatus::Disconnected;
        self.last_activity = now;
        true
    }

    /// 最終アクティビティ時刻を更新する
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = now;
    }

    /// 終端状態かどうか
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
