//! UseCase: アクティビティ更新処理
//!
//! 最終アクティビティ時刻の更新は 1 フィールドの変更だが、Store には
//! レコード全体の更新として扱わせ、購読者にも通常どおり通知する。

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionStore, ConnectionWatcherHub, StoreError, Timestamp,
};

use super::broadcast_active;

/// アクティビティ更新のユースケース
pub struct RefreshActivityUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn ConnectionStore>,
    /// WatcherHub（変更通知の抽象化）
    watcher_hub: Arc<dyn ConnectionWatcherHub>,
    /// 時計（タイムスタンプ取得の抽象化）
    clock: Arc<dyn Clock>,
}

impl RefreshActivityUseCase {
    /// 新しい RefreshActivityUseCase を作成
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

    /// 最終アクティビティ時刻を現在時刻へ更新する
    ///
    /// 存在しない ID は何もしない（通知もしない）。
    pub async fn execute(&self, id: &ConnectionId) -> Result<(), StoreError> {
        let Some(mut record) = self.store.get(id).await else {
            tracing::debug!(
                "Activity refresh requested for unknown connection '{}'",
                id.as_str()
            );
            return Ok(());
        };

        record.touch(Timestamp::new(self.clock.now_millis()));
        self.store.update(record).await?;
        broadcast_active(self.store.as_ref(), self.watcher_hub.as_ref()).await;

        Ok(())
    }
}
