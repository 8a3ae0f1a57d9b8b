//! UseCase 層のエラー型定義

use thiserror::Error;

use crate::domain::{HandshakeError, StoreError};

/// 接続確立（connect）のエラー
#[derive(Debug, Error)]
pub enum ConnectError {
    /// ハンドシェイク失敗（レコードは error 状態で Store に残る）
    #[error("handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    /// ハンドシェイク完了前に接続が閉じられた（結果は破棄済み）
    #[error("connection '{0}' was closed before the handshake completed")]
    Cancelled(String),

    /// Store 操作の失敗
    #[error(transparent)]
    Store(#[from] StoreError),
}
