//! UseCase: 接続確立処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - OpenConnectionUseCase::execute() メソッド
//! - レコード生成 → 登録 → アクティブ設定 → 通知 → ハンドシェイク →
//!   結果適用 → 再通知、という一連の順序
//!
//! ### なぜこのテストが必要か
//! - ライフサイクルの中核：通知順序と Store の整合性を保証する
//! - ハンドシェイク失敗時に error レコードが残り、エラーが呼び出し側へ
//!   伝搬することを確認
//! - 接続のたびに新しい id / room_id が発行されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ハンドシェイク成功で connected レコードが返る
//! - 異常系：ハンドシェイク失敗（error レコードが Store に残る）
//! - エッジケース：ハンドシェイク中に閉じられたレコード（結果破棄）

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::domain::{
    ConnectionIdFactory, ConnectionRecord, ConnectionStore, ConnectionWatcherHub,
    HandshakeRequest, RoomHandshake, RoomIdFactory, Timestamp, UserIdentity, link,
};

use super::broadcast_active;
use super::error::ConnectError;

/// 接続確立リクエスト
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    /// 接続するユーザーの身元スナップショット
    pub identity: UserIdentity,
    /// ルームを新規作成するか（既定は `true`）
    pub create_new_room: bool,
}

impl ConnectRequest {
    /// 新しい ConnectRequest を作成（ルームは新規作成）
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            identity,
            create_new_room: true,
        }
    }
}

/// 接続確立のユースケース
pub struct OpenConnectionUseCase {
    /// Store（データアクセス層の抽象化）
    store: Arc<dyn ConnectionStore>,
    /// ハンドシェイク（リモートセッション確立の抽象化）
    handshake: Arc<dyn RoomHandshake>,
    /// WatcherHub（変更通知の抽象化）
    watcher_hub: Arc<dyn ConnectionWatcherHub>,
    /// 時計（タイムスタンプ取得の抽象化）
    clock: Arc<dyn Clock>,
    /// 共有リンクの起点となるオリジン
    origin: String,
}

impl OpenConnectionUseCase {
    /// 新しい OpenConnectionUseCase を作成
    pub fn new(
        store: Arc<dyn ConnectionStore>,
        handshake: Arc<dyn RoomHandshake>,
        watcher_hub: Arc<dyn ConnectionWatcherHub>,
        clock: Arc<dyn Clock>,
        origin: String,
    ) -> Self {
        Self {
            store,
            handshake,
            watcher_hub,
            clock,
            origin,
        }
    }

    /// 接続確立を実行
    ///
    /// # Arguments
    ///
    /// * `request` - 身元スナップショットとルーム作成フラグ
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectionRecord)` - connected 状態のレコード
    /// * `Err(ConnectError)` - ハンドシェイク失敗（error レコードは Store に
    ///   残る）、またはハンドシェイク中の切断
    pub async fn execute(&self, request: ConnectRequest) -> Result<ConnectionRecord, ConnectError> {
        // 1. 新しいレコードを connecting 状態で生成
        let created_at = Timestamp::new(self.clock.now_millis());
        let id = ConnectionIdFactory::generate(created_at);
        let room_id = RoomIdFactory::generate(&request.identity.user_id, created_at);
        let connection_url = link::generate_connection_url(&self.origin, &room_id);
        let record = ConnectionRecord::new(
            id.clone(),
            request.identity.clone(),
            room_id.clone(),
            connection_url,
            created_at,
        );

        // 2. 登録・アクティブ設定・通知（ハンドシェイク開始前）
        self.store.insert(record).await?;
        self.store.set_active(Some(id.clone())).await;
        broadcast_active(self.store.as_ref(), self.watcher_hub.as_ref()).await;
        tracing::debug!(
            "Connection '{}' registered for user '{}'",
            id.as_str(),
            request.identity.user_id.as_str()
        );

        // 3. ハンドシェイク（唯一のサスペンションポイント）
        let handshake_request = HandshakeRequest {
            room_id,
            identity: request.identity,
            create_new_room: request.create_new_room,
        };
        let outcome = self.handshake.establish(&handshake_request).await;

        // 4. 結果の適用
        //    ハンドシェイク中に閉じられた（または clear された）レコードには
        //    適用せず、結果を破棄する
        let now = Timestamp::new(self.clock.now_millis());
        let Some(mut record) = self.store.get(&id).await else {
            tracing::debug!(
                "Connection '{}' disappeared during handshake, discarding result",
                id.as_str()
            );
            return Err(ConnectError::Cancelled(id.as_str().to_string()));
        };
        if !record.resolve_handshake(outcome.is_ok(), now) {
            tracing::debug!(
                "Connection '{}' already {}, discarding stale handshake result",
                id.as_str(),
                record.status
            );
            return Err(ConnectError::Cancelled(id.as_str().to_string()));
        }

        match outcome {
            Ok(()) => {
                // 5. 成功: 更新を保存し、改めてアクティブに設定して通知
                //    （後から走った connect が居ても last writer wins）
                self.store.update(record.clone()).await?;
                self.store.set_active(Some(id.clone())).await;
                broadcast_active(self.store.as_ref(), self.watcher_hub.as_ref()).await;
                tracing::info!(
                    "Connection '{}' established (room '{}')",
                    id.as_str(),
                    record.room_id.as_str()
                );
                Ok(record)
            }
            Err(e) => {
                // 5. 失敗: error レコードとして保存・通知し、エラーを伝搬
                self.store.update(record).await?;
                broadcast_active(self.store.as_ref(), self.watcher_hub.as_ref()).await;
                tracing::warn!("Handshake failed for connection '{}': {}", id.as_str(), e);
                Err(ConnectError::Handshake(e))
            }
        }
    }
}
