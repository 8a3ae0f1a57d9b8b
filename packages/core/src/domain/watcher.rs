//! 接続変更監視（ブロードキャスト）のポート定義
//!
//! UI 側の購読者へ「現在のアクティブ接続のスナップショット」を配信する
//! インターフェースを定義します。具体的な実装は Infrastructure 層が
//! 提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::entity::ConnectionRecord;

/// 配信されるスナップショット（アクティブ接続、または無し）
pub type ConnectionSnapshot = Option<ConnectionRecord>;

/// 購読者へ通知を送るチャンネル
pub type WatcherChannel = mpsc::UnboundedSender<ConnectionSnapshot>;

/// 購読者を一意に識別する ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatcherId(String);

impl WatcherId {
    /// 新しい WatcherId を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 接続変更監視のポート
///
/// - 同一 ID の再登録は上書き（購読者集合は set セマンティクス）
/// - 1 購読者への配信失敗は他の購読者への配信を妨げない
#[async_trait]
pub trait ConnectionWatcherHub: Send + Sync {
    /// 購読者を登録
    async fn register(&self, watcher_id: WatcherId, channel: WatcherChannel);

    /// 購読者を解除
    async fn unregister(&self, watcher_id: &WatcherId);

    /// 全購読者へスナップショットを配信
    async fn broadcast(&self, snapshot: ConnectionSnapshot);

    /// 登録中の購読者数を取得
    async fn watcher_count(&self) -> usize;
}
