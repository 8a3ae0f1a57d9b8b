//! 疑似ハンドシェイク実装
//!
//! ネットワーク往復とルーム準備にかかる待ち時間を一定の遅延で模倣します。
//! チャットバックエンドなしで動作させる場合と、テストで遷移順序を検証する
//! 場合に使用します。結果の 2 値契約（成功 / 失敗）とレコード遷移・通知の
//! 順序は `WebSocketRoomHandshake` と同一です。

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{HandshakeError, HandshakeRequest, RoomHandshake};

/// 既定の遅延（実ネットワークのルーム準備相当）
const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

/// 疑似ハンドシェイク実装
pub struct SimulatedHandshake {
    latency: Duration,
    failure_reason: Option<String>,
}

impl SimulatedHandshake {
    /// 既定の遅延（約 1 秒）の後に成功するハンドシェイクを作成
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    /// 遅延を指定して成功するハンドシェイクを作成
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            failure_reason: None,
        }
    }

    /// 常に失敗するハンドシェイクを作成（テスト・デモ用）
    pub fn failing(latency: Duration, reason: impl Into<String>) -> Self {
        Self {
            latency,
            failure_reason: Some(reason.into()),
        }
    }
}

impl Default for SimulatedHandshake {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomHandshake for SimulatedHandshake {
    async fn establish(&self, request: &HandshakeRequest) -> Result<(), HandshakeError> {
        tracing::debug!(
            "Simulating handshake for room '{}' ({}ms)",
            request.room_id.as_str(),
            self.latency.as_millis()
        );
        tokio::time::sleep(self.latency).await;

        match &self.failure_reason {
            Some(reason) => Err(HandshakeError::RoomSetup(reason.clone())),
            None => Ok(()),
        }
    }
}
