//! チャンネルベースの ConnectionWatcherHub 実装
//!
//! ## 責務
//!
//! - 購読者ごとの `UnboundedSender` を管理
//! - アクティブ接続スナップショットの配信（broadcast）
//!
//! ## 設計ノート
//!
//! 配信前に送信先一覧をスナップショットし、ロックを保持したまま通知
//! しません。これにより購読者は通知処理の中から subscribe / unsubscribe を
//! 呼び出せます（再入許容）。
//!
//! 1 購読者への送信失敗（受信側 drop 済みなど）は warn ログに残して
//! 残りの購読者への配信を継続し、該当チャンネルは Hub から取り除きます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionSnapshot, ConnectionWatcherHub, WatcherChannel, WatcherId};

/// チャンネルベースの ConnectionWatcherHub 実装
///
/// ## フィールド
///
/// - `watchers`: 購読者 ID と対応する送信チャンネルのマップ
pub struct ChannelWatcherHub {
    watchers: Mutex<HashMap<WatcherId, WatcherChannel>>,
}

impl ChannelWatcherHub {
    /// 新しい ChannelWatcherHub を作成
    pub fn new() -> Self {
        Self {
            watchers: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for ChannelWatcherHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionWatcherHub for ChannelWatcherHub {
    async fn register(&self, watcher_id: WatcherId, channel: WatcherChannel) {
        let mut watchers = self.watchers.lock().await;
        watchers.insert(watcher_id.clone(), channel);
        tracing::debug!("Watcher '{}' registered", watcher_id.as_str());
    }

    async fn unregister(&self, watcher_id: &WatcherId) {
        let mut watchers = self.watchers.lock().await;
        watchers.remove(watcher_id);
        tracing::debug!("Watcher '{}' unregistered", watcher_id.as_str());
    }

    async fn broadcast(&self, snapshot: ConnectionSnapshot) {
        // 配信前に送信先一覧をスナップショット（ロック保持中に通知しない）
        let targets: Vec<(WatcherId, WatcherChannel)> = {
            let watchers = self.watchers.lock().await;
            watchers
                .iter()
                .map(|(id, channel)| (id.clone(), channel.clone()))
                .collect()
        };

        let mut dead = Vec::new();
        for (watcher_id, channel) in targets {
            if let Err(e) = channel.send(snapshot.clone()) {
                // 配信では一部の送信失敗を許容
                tracing::warn!(
                    "Failed to notify watcher '{}': {}",
                    watcher_id.as_str(),
                    e
                );
                dead.push(watcher_id);
            } else {
                tracing::debug!("Notified watcher '{}'", watcher_id.as_str());
            }
        }

        if !dead.is_empty() {
            let mut watchers = self.watchers.lock().await;
            for watcher_id in dead {
                watchers.remove(&watcher_id);
            }
        }
    }

    async fn watcher_count(&self) -> usize {
        let watchers = self.watchers.lock().await;
        watchers.len()
    }
}
