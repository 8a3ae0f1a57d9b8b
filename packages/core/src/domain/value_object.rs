//! 値オブジェクト定義
//!
//! 接続レコードを構成する識別子・タイムスタンプを不変条件付きで定義します。
//! 生成時に検証を行い、以降は不変として扱います。

use uuid::Uuid;

use super::error::ValidationError;

/// ユーザー ID の最大長
const USER_ID_MAX_LENGTH: usize = 64;

/// 識別子のランダムサフィックス長（UUID v4 先頭 8 文字）
const ID_SUFFIX_LENGTH: usize = 8;

/// ユーザー ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// 新しい UserId を作成（空・長すぎる ID は拒否）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        let length = value.chars().count();
        if length > USER_ID_MAX_LENGTH {
            return Err(ValidationError::UserIdTooLong {
                max: USER_ID_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ユーザーの身元スナップショット
///
/// 接続レコード作成時点の値を保持し、以降は変更しない。
/// 身元が変わった場合は新しいレコードを作成する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
}

impl UserIdentity {
    /// 新しい UserIdentity を作成
    pub fn new(user_id: UserId, user_name: String, user_email: String) -> Self {
        Self {
            user_id,
            user_name,
            user_email,
        }
    }
}

/// 接続 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を作成（空 ID は拒否）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ConnectionId のファクトリ
///
/// 作成時刻とランダムサフィックスを組み合わせ、プロセス内で衝突しない
/// 識別子を生成します。
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// 新しい ConnectionId を生成
    pub fn generate(created_at: Timestamp) -> ConnectionId {
        ConnectionId(format!(
            "conn_{}_{}",
            created_at.value(),
            random_suffix()
        ))
    }
}

/// ルーム ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// 新しい RoomId を作成（空 ID は拒否）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// RoomId のファクトリ
///
/// ユーザー ID と作成時刻から導出します。同一ユーザー・同一ミリ秒の
/// 連続生成でも衝突しないようランダムサフィックスを付与します。
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// 新しい RoomId を生成
    pub fn generate(user_id: &UserId, created_at: Timestamp) -> RoomId {
        RoomId(format!(
            "room_{}_{}_{}",
            user_id.as_str(),
            created_at.value(),
            random_suffix()
        ))
    }
}

/// Unix タイムスタンプ（UTC、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 新しい Timestamp を作成
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

fn random_suffix() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    uuid[..ID_SUFFIX_LENGTH].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_id_accepts_valid_value() {
        // テスト項目: 有効なユーザー ID が受理される
        // given (前提条件):
        let value = "customer-1001".to_string();

        // when (操作):
        let result = UserId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "customer-1001");
    }

    #[test]
    fn test_user_id_rejects_empty_value() {
        // テスト項目: 空のユーザー ID が拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = UserId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::EmptyUserId));
    }

    #[test]
    fn test_user_id_rejects_too_long_value() {
        // テスト項目: 長すぎるユーザー ID が拒否される
        // given (前提条件):
        let value = "x".repeat(USER_ID_MAX_LENGTH + 1);

        // when (操作):
        let result = UserId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValidationError::UserIdTooLong {
                max: USER_ID_MAX_LENGTH,
                actual: USER_ID_MAX_LENGTH + 1,
            })
        );
    }

    #[test]
    fn test_connection_id_rejects_empty_value() {
        // テスト項目: 空の接続 ID が拒否される
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::EmptyConnectionId));
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: 同一タイムスタンプでも接続 ID が衝突しない
        // given (前提条件):
        let created_at = Timestamp::new(1700000000000);

        // when (操作):
        let ids: HashSet<String> = (0..100)
            .map(|_| ConnectionIdFactory::generate(created_at).into_string())
            .collect();

        // then (期待する結果):
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_connection_id_embeds_creation_time() {
        // テスト項目: 接続 ID に作成時刻が埋め込まれる
        // given (前提条件):
        let created_at = Timestamp::new(1700000000000);

        // when (操作):
        let id = ConnectionIdFactory::generate(created_at);

        // then (期待する結果):
        assert!(id.as_str().starts_with("conn_1700000000000_"));
    }

    #[test]
    fn test_room_id_factory_derives_from_user_and_time() {
        // テスト項目: ルーム ID がユーザー ID と作成時刻から導出される
        // given (前提条件):
        let user_id = UserId::new("alice".to_string()).unwrap();
        let created_at = Timestamp::new(1700000000000);

        // when (操作):
        let room_id = RoomIdFactory::generate(&user_id, created_at);

        // then (期待する結果):
        assert!(room_id.as_str().starts_with("room_alice_1700000000000_"));
    }

    #[test]
    fn test_room_id_factory_generates_unique_ids() {
        // テスト項目: 同一ユーザー・同一時刻でもルーム ID が衝突しない
        // given (前提条件):
        let user_id = UserId::new("alice".to_string()).unwrap();
        let created_at = Timestamp::new(1700000000000);

        // when (操作):
        let ids: HashSet<String> = (0..100)
            .map(|_| RoomIdFactory::generate(&user_id, created_at).into_string())
            .collect();

        // then (期待する結果):
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: Timestamp がミリ秒値の順序で比較できる
        // given (前提条件):
        let earlier = Timestamp::new(1000);
        let later = Timestamp::new(2000);

        // when (操作):

        // then (期待する結果):
        assert!(earlier < later);
        assert_eq!(earlier, Timestamp::new(1000));
    }
}
