//! UseCase: 接続切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CloseConnectionUseCase::execute() メソッド
//! - 切断時のアクティブポインタ解除と通知
//! - clear_all() による全レコード破棄
//!
//! ### なぜこのテストが必要か
//! - 「閉じたレコードがアクティブだった場合のみポインタを外す」という
//!   不変条件を保証する
//! - 存在しない ID・切断済みレコードへの操作が no-op（通知もしない）で
//!   あることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：アクティブな接続の切断
//! - 正常系：非アクティブな接続の切断（ポインタは維持）
//! - エッジケース：存在しない ID、二重切断

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionStore, ConnectionWatcherHub, StoreError, Timestamp,
};

use super::broadcast_active;

/// 接続切断のユースケース
pub struct CloseConnectionUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn ConnectionStore>,
    /// WatcherHub（変更通知の抽象化）
    watcher_hub: Arc<dyn ConnectionWatcherHub>,
    /// 時計（タイムスタンプ取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl CloseConnectionUseCase {
    /// 新しい CloseConnectionUseCase を作成
    pub fn new(
        store: Arc<dyn ConnectionStore>,
        watcher_hub: Arc<dyn ConnectionWatcherHub>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            watcher_hub,
            clock,
        }
    }

    /// 接続を切断する
    ///
    /// 存在しない ID・既に disconnected のレコードは何もしない（通知もしない）。
    /// 閉じたレコードがアクティブだった場合のみアクティブポインタを外す。
    pub async fn execute(&self, id: &ConnectionId) -> Result<(), StoreError> {
        let Some(mut record) = self.store.get(id).await else {
            tracing::debug!("Close requested for unknown connection '{}'", id.as_str());
            return Ok(());
        };

        let now = Timestamp::new(self.clock.now_millis());
        if !record.mark_disconnected(now) {
            // 既に終端状態（冪等）
            return Ok(());
        }

        self.store.update(record).await?;
        if self.store.active_id().await.as_ref() == Some(id) {
            self.store.set_active(None).await;
        }
        broadcast_active(self.store.as_ref(), self.watcher_hub.as_ref()).await;
        tracing::info!("Connection '{}' closed", id.as_str());

        Ok(())
    }

    /// 全レコードとアクティブポインタを破棄して通知する
    ///
    /// プロセス終了時やログアウト時の後始末、およびテストで使用する。
    pub async fn clear_all(&self) {
        self.store.clear().await;
        self.watcher_hub.broadcast(None).await;
        tracing::info!("All connection records cleared");
    }
}
