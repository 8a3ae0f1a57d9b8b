//! 接続マネージャ（コンテキストオブジェクト）
//!
//! Store・ハンドシェイク・WatcherHub・時計を束ね、UI 層へ公開する唯一の
//! 窓口。アプリケーション起動時に明示的に生成し、必要な場所へ注入して
//! 使います（暗黙のグローバル状態には依存しない）。後始末は
//! `clear_all` で行います。

use std::sync::Arc;

use tokio::sync::mpsc;
use tsunagi_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionRecord, ConnectionSnapshot, ConnectionStore, ConnectionWatcherHub,
    RoomHandshake, RoomId, StoreError, UserId, WatcherId, link,
};

use super::close_connection::CloseConnectionUseCase;
use super::error::ConnectError;
use super::open_connection::{ConnectRequest, OpenConnectionUseCase};
use super::refresh_activity::RefreshActivityUseCase;

/// マネージャの設定
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// 共有リンクの起点となるオリジン（例: `https://shop.example.com`）
    pub origin: String,
}

impl ManagerConfig {
    /// 新しい ManagerConfig を作成
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

/// チャット接続マネージャ
///
/// 1 プロセスにつき 1 つ生成し、接続ライフサイクルに関する操作を
/// すべてこのマネージャ経由で行う。返されるレコードはスナップショット
/// （クローン）であり、変更は必ずマネージャの操作を通す。
pub struct ChatConnectionManager {
    store: Arc<dyn ConnectionStore>,
    watcher_hub: Arc<dyn ConnectionWatcherHub>,
    config: ManagerConfig,
    open_connection_usecase: OpenConnectionUseCase,
    close_connection_usecase: CloseConnectionUseCase,
    refresh_activity_usecase: RefreshActivityUseCase,
}

impl ChatConnectionManager {
    /// 新しい ChatConnectionManager を作成
    pub fn new(
        config: ManagerConfig,
        store: Arc<dyn ConnectionStore>,
        watcher_hub: Arc<dyn ConnectionWatcherHub>,
        handshake: Arc<dyn RoomHandshake>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let open_connection_usecase = OpenConnectionUseCase::new(
            store.clone(),
            handshake,
            watcher_hub.clone(),
            clock.clone(),
            config.origin.clone(),
        );
        let close_connection_usecase =
            CloseConnectionUseCase::new(store.clone(), watcher_hub.clone(), clock.clone());
        let refresh_activity_usecase =
            RefreshActivityUseCase::new(store.clone(), watcher_hub.clone(), clock);
        Self {
            store,
            watcher_hub,
            config,
            open_connection_usecase,
            close_connection_usecase,
            refresh_activity_usecase,
        }
    }

    /// 新しい接続を確立する
    ///
    /// 呼び出しごとに必ず新しいレコードとルームを発行する（既存の
    /// アクティブ接続の再利用はしない）。成功時は connected レコードを
    /// 返し、失敗時は error レコードを Store に残してエラーを返す。
    pub async fn connect(&self, request: ConnectRequest) -> Result<ConnectionRecord, ConnectError> {
        self.open_connection_usecase.execute(request).await
    }

    /// 接続を切断する（存在しない ID は no-op）
    pub async fn close(&self, id: &ConnectionId) -> Result<(), StoreError> {
        self.close_connection_usecase.execute(id).await
    }

    /// 最終アクティビティ時刻を現在時刻へ更新する（存在しない ID は no-op）
    pub async fn refresh_activity(&self, id: &ConnectionId) -> Result<(), StoreError> {
        self.refresh_activity_usecase.execute(id).await
    }

    /// 現在のアクティブ接続を返す
    pub async fn active_connection(&self) -> Option<ConnectionRecord> {
        match self.store.active_id().await {
            Some(id) => self.store.get(&id).await,
            None => None,
        }
    }

    /// ID を指定してレコードを取得する
    pub async fn connection(&self, id: &ConnectionId) -> Option<ConnectionRecord> {
        self.store.get(id).await
    }

    /// 指定ユーザーの全レコードを作成時刻の降順（新しい順）で返す
    pub async fn connections_for_user(&self, user_id: &UserId) -> Vec<ConnectionRecord> {
        let mut records = self.store.list_by_user(user_id).await;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// 登録済みレコード数を返す
    pub async fn connection_count(&self) -> usize {
        self.store.count().await
    }

    /// アクティブ接続の変更を購読する
    ///
    /// 登録直後に現在のスナップショットが 1 回配信され、以後すべての
    /// 状態変更操作でスナップショットが配信される。購読をやめるには
    /// 返された `Subscription` の `unsubscribe` を呼ぶ。
    pub async fn subscribe(&self) -> (Subscription, mpsc::UnboundedReceiver<ConnectionSnapshot>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher_id = WatcherId::generate();

        // 購読直後の初期通知（現在のアクティブスナップショット）
        let snapshot = self.active_connection().await;
        let _ = tx.send(snapshot);

        self.watcher_hub.register(watcher_id.clone(), tx).await;
        (
            Subscription {
                watcher_id,
                watcher_hub: self.watcher_hub.clone(),
            },
            rx,
        )
    }

    /// ダッシュボード用の共有 URL を導出する
    pub fn connection_url(&self, room_id: &RoomId) -> String {
        link::generate_connection_url(&self.config.origin, room_id)
    }

    /// ルーム直行リンクを導出する
    pub fn chat_link(&self, room_id: &RoomId) -> String {
        link::generate_chat_link(&self.config.origin, room_id)
    }

    /// 全レコードとアクティブポインタを破棄する（後始末・テスト用）
    pub async fn clear_all(&self) {
        self.close_connection_usecase.clear_all().await;
    }
}

/// 購読のハンドル
pub struct Subscription {
    watcher_id: WatcherId,
    watcher_hub: Arc<dyn ConnectionWatcherHub>,
}

impl Subscription {
    /// 購読を解除する
    pub async fn unsubscribe(self) {
        self.watcher_hub.unregister(&self.watcher_id).await;
    }

    pub fn watcher_id(&self) -> &WatcherId {
        &self.watcher_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionIdFactory, ConnectionRecord, RoomIdFactory, Timestamp, UserIdentity,
    };
    use crate::infrastructure::handshake::SimulatedHandshake;
    use crate::infrastructure::repository::InMemoryConnectionStore;
    use crate::infrastructure::watcher::ChannelWatcherHub;
    use std::time::Duration;
    use tsunagi_shared::time::SystemClock;

    fn create_manager() -> (ChatConnectionManager, Arc<InMemoryConnectionStore>) {
        let store = Arc::new(InMemoryConnectionStore::new());
        let manager = ChatConnectionManager::new(
            ManagerConfig::new("https://shop.example.com"),
            store.clone(),
            Arc::new(ChannelWatcherHub::new()),
            Arc::new(SimulatedHandshake::with_latency(Duration::from_millis(1))),
            Arc::new(SystemClock),
        );
        (manager, store)
    }

    fn create_test_record(user: &str, created_at_millis: i64) -> ConnectionRecord {
        let created_at = Timestamp::new(created_at_millis);
        let user_id = UserId::new(user.to_string()).unwrap();
        let room_id = RoomIdFactory::generate(&user_id, created_at);
        let identity = UserIdentity::new(
            user_id,
            format!("{} name", user),
            format!("{}@example.com", user),
        );
        ConnectionRecord::new(
            ConnectionIdFactory::generate(created_at),
            identity,
            room_id,
            "https://shop.example.com/dashboard/chat?room=r1".to_string(),
            created_at,
        )
    }

    #[tokio::test]
    async fn test_connections_for_user_sorted_newest_first() {
        // テスト項目: ユーザー別一覧が created_at の降順で返される
        // given (前提条件):
        let (manager, store) = create_manager();
        store
            .insert(create_test_record("alice", 1700000001000))
            .await
            .unwrap();
        store
            .insert(create_test_record("alice", 1700000003000))
            .await
            .unwrap();
        store
            .insert(create_test_record("alice", 1700000002000))
            .await
            .unwrap();
        store
            .insert(create_test_record("bob", 1700000004000))
            .await
            .unwrap();

        // when (操作):
        let alice = UserId::new("alice".to_string()).unwrap();
        let records = manager.connections_for_user(&alice).await;

        // then (期待する結果): alice の 3 件が新しい順に並ぶ
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].created_at, Timestamp::new(1700000003000));
        assert_eq!(records[1].created_at, Timestamp::new(1700000002000));
        assert_eq!(records[2].created_at, Timestamp::new(1700000001000));
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_snapshot() {
        // テスト項目: 購読直後に現在のスナップショット（無し）が配信される
        // given (前提条件):
        let (manager, _store) = create_manager();

        // when (操作):
        let (subscription, mut rx) = manager.subscribe().await;

        // then (期待する結果):
        assert_eq!(rx.recv().await, Some(None));
        assert!(rx.try_recv().is_err());

        subscription.unsubscribe().await;
    }

    #[tokio::test]
    async fn test_active_connection_reads_through_pointer() {
        // テスト項目: active_connection がポインタ経由でレコードを返す
        // given (前提条件):
        let (manager, store) = create_manager();
        let record = create_test_record("alice", 1700000000000);
        store.insert(record.clone()).await.unwrap();

        // when (操作): ポインタ未設定
        assert_eq!(manager.active_connection().await, None);

        // ポインタを設定
        store.set_active(Some(record.id.clone())).await;

        // then (期待する結果):
        assert_eq!(manager.active_connection().await, Some(record));
    }

    #[tokio::test]
    async fn test_link_derivations_use_configured_origin() {
        // テスト項目: リンク導出が設定されたオリジンを使用する
        // given (前提条件):
        let (manager, _store) = create_manager();
        let user_id = UserId::new("alice".to_string()).unwrap();
        let room_id = RoomIdFactory::generate(&user_id, Timestamp::new(1700000000000));

        // when (操作):
        let connection_url = manager.connection_url(&room_id);
        let chat_link = manager.chat_link(&room_id);

        // then (期待する結果):
        assert!(connection_url.starts_with("https://shop.example.com/dashboard/chat?room="));
        assert!(chat_link.starts_with("https://shop.example.com/chat/"));
    }
}
