//! ConnectionStore trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## アクティブポインタについて
//!
//! 「現在ライブとみなしている接続」を指すポインタは、Store 内のレコードを
//! 指す非所有の ID として Store と同居させます。レコードとポインタの
//! 整合性（ポインタが指す先は必ず Store に存在する）を 1 つの実装で
//! 保証するためです。ポインタの更新は UseCase 層のみが行います。

use async_trait::async_trait;

use super::entity::ConnectionRecord;
use super::error::StoreError;
use super::value_object::{ConnectionId, UserId};

/// Connection Record Store のポート
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しない。レコードの生成・変更は UseCase 層（ライフサイクル制御）
/// だけが行い、UI 側の利用者は取得したスナップショットを読み取り専用で
/// 扱う。
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// レコードを新規登録
    async fn insert(&self, record: ConnectionRecord) -> Result<(), StoreError>;

    /// 既存レコードを更新（存在しない場合はエラー）
    async fn update(&self, record: ConnectionRecord) -> Result<(), StoreError>;

    /// ID でレコードを取得
    async fn get(&self, id: &ConnectionId) -> Option<ConnectionRecord>;

    /// 指定ユーザーの全レコードを取得（順序は保証しない）
    async fn list_by_user(&self, user_id: &UserId) -> Vec<ConnectionRecord>;

    /// アクティブ接続のポインタを設定
    async fn set_active(&self, id: Option<ConnectionId>);

    /// アクティブ接続の ID を取得
    async fn active_id(&self) -> Option<ConnectionId>;

    /// 登録済みレコード数を取得
    async fn count(&self) -> usize;

    /// 全レコードとアクティブポインタを破棄
    async fn clear(&self);
}
