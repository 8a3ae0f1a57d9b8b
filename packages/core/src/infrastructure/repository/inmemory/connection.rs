//! InMemory Connection Store 実装
//!
//! ドメイン層が定義する ConnectionStore trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! レコードとアクティブポインタは同一の Mutex 配下に置き、
//! 「ポインタが指す先は必ず Store に存在する（または None）」という
//! 不変条件を clear 時もまとめて維持します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRecord, ConnectionStore, StoreError, UserId};

struct StoreInner {
    records: HashMap<ConnectionId, ConnectionRecord>,
    active_id: Option<ConnectionId>,
}

/// インメモリ Connection Store 実装
pub struct InMemoryConnectionStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryConnectionStore {
    /// 新しい InMemoryConnectionStore を作成
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                records: HashMap::new(),
                active_id: None,
            }),
        }
    }
}

impl Default for InMemoryConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionStore for InMemoryConnectionStore {
    async fn insert(&self, record: ConnectionRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update(&self, record: ConnectionRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.records.contains_key(&record.id) {
            return Err(StoreError::RecordNotFound(record.id.as_str().to_string()));
        }
        inner.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &ConnectionId) -> Option<ConnectionRecord> {
        let inner = self.inner.lock().await;
        inner.records.get(id).cloned()
    }

    async fn list_by_user(&self, user_id: &UserId) -> Vec<ConnectionRecord> {
        let inner = self.inner.lock().await;
        inner
            .records
            .values()
            .filter(|record| &record.identity.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn set_active(&self, id: Option<ConnectionId>) {
        let mut inner = self.inner.lock().await;
        inner.active_id = id;
    }

    async fn active_id(&self) -> Option<ConnectionId> {
        let inner = self.inner.lock().await;
        inner.active_id.clone()
    }

    async fn count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.records.len()
    }

    async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.records.clear();
        inner.active_id = None;
    }
}
