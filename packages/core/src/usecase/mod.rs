//! UseCase 層
//!
//! 接続ライフサイクルの各操作（確立・切断・アクティビティ更新）と、
//! それらを束ねて UI 層へ公開する `ChatConnectionManager` を提供します。

mod close_connection;
mod error;
mod manager;
mod open_connection;
mod refresh_activity;

pub use close_connection::CloseConnectionUseCase;
pub use error::ConnectError;
pub use manager::{ChatConnectionManager, ManagerConfig, Subscription};
pub use open_connection::{ConnectRequest, OpenConnectionUseCase};
pub use refresh_activity::RefreshActivityUseCase;

use crate::domain::{ConnectionStore, ConnectionWatcherHub};

/// 現在のアクティブ接続スナップショットを全購読者へ配信する
pub(crate) async fn broadcast_active(
    store: &dyn ConnectionStore,
    watcher_hub: &dyn ConnectionWatcherHub,
) {
    let snapshot = match store.active_id().await {
        Some(id) => store.get(&id).await,
        None => None,
    };
    watcher_hub.broadcast(snapshot).await;
}
