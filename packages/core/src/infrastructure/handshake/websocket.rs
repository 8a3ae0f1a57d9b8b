//! WebSocket を使ったハンドシェイク実装
//!
//! ## 責務
//!
//! - REST API 経由のルーム作成（`create_new_room` 指定時のみ）
//! - WebSocket トランスポートの確立と join 送信によるプレゼンス登録
//! - チャットサービスからの `room_ready` / `error` 応答の待ち受け
//!
//! ## 設計ノート
//!
//! ハンドシェイクはセッションの成立確認までを担当し、以降のメッセージ
//! 配送はチャットウィジェット側のトランスポートが担当します。そのため
//! `room_ready` 受信後にソケットはクローズします。

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::domain::{HandshakeError, HandshakeRequest, RoomHandshake};
use crate::infrastructure::dto::http::{CreateRoomRequest, CreateRoomResponse};
use crate::infrastructure::dto::websocket::{
    ErrorMessage, JoinRoomMessage, MessageType, RoomReadyMessage,
};

/// `room_ready` 待ちの上限秒数
const HANDSHAKE_TIMEOUT_SECS: u64 = 10;

/// WebSocket を使ったハンドシェイク実装
///
/// ## フィールド
///
/// - `api_base`: REST API のベース URL（例: `http://127.0.0.1:8080`）
/// - `ws_url`: WebSocket エンドポイント URL（例: `ws://127.0.0.1:8080/ws`）
pub struct WebSocketRoomHandshake {
    api_base: String,
    ws_url: String,
    http_client: reqwest::Client,
}

impl WebSocketRoomHandshake {
    /// 新しい WebSocketRoomHandshake を作成
    pub fn new(api_base: impl Into<String>, ws_url: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ws_url: ws_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// REST API 経由でルームを作成する
    async fn create_room(&self, request: &HandshakeRequest) -> Result<(), HandshakeError> {
        let body = CreateRoomRequest {
            room_id: request.room_id.as_str().to_string(),
            user_id: request.identity.user_id.as_str().to_string(),
        };

        let response = self
            .http_client
            .post(format!("{}/api/rooms", self.api_base))
            .json(&body)
            .send()
            .await
            .map_err(|e| HandshakeError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(HandshakeError::RoomSetup(format!(
                "room creation returned status {}",
                response.status()
            )));
        }

        let created: CreateRoomResponse = response
            .json()
            .await
            .map_err(|e| HandshakeError::RoomSetup(e.to_string()))?;
        tracing::debug!("Room '{}' ready on chat service", created.room_id);

        Ok(())
    }

    /// トランスポートを開き、join を送って `room_ready` を待つ
    async fn join_room(&self, request: &HandshakeRequest) -> Result<(), HandshakeError> {
        let url = format!(
            "{}?room_id={}&user_id={}",
            self.ws_url,
            request.room_id.as_str(),
            request.identity.user_id.as_str()
        );

        let (ws_stream, _response) = connect_async(&url)
            .await
            .map_err(|e| HandshakeError::Transport(e.to_string()))?;
        let (mut write, mut read) = ws_stream.split();

        let join = JoinRoomMessage {
            r#type: MessageType::Join,
            room_id: request.room_id.as_str().to_string(),
            user_id: request.identity.user_id.as_str().to_string(),
            user_name: request.identity.user_name.clone(),
            user_email: request.identity.user_email.clone(),
        };
        let json =
            serde_json::to_string(&join).map_err(|e| HandshakeError::Transport(e.to_string()))?;
        write
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| HandshakeError::Transport(e.to_string()))?;

        // room_ready か error を待つ（タイムアウト付き）
        let wait = tokio::time::timeout(Duration::from_secs(HANDSHAKE_TIMEOUT_SECS), async {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if let Ok(ready) = serde_json::from_str::<RoomReadyMessage>(&text)
                            && ready.r#type == MessageType::RoomReady
                        {
                            return Ok(());
                        }
                        if let Ok(error_msg) = serde_json::from_str::<ErrorMessage>(&text)
                            && error_msg.r#type == MessageType::Error
                        {
                            return Err(HandshakeError::Rejected(error_msg.message));
                        }
                        tracing::debug!("Ignoring unexpected handshake message: {}", text);
                    }
                    Ok(Message::Close(_)) => {
                        return Err(HandshakeError::Transport(
                            "chat service closed the connection during handshake".to_string(),
                        ));
                    }
                    Err(e) => return Err(HandshakeError::Transport(e.to_string())),
                    _ => {}
                }
            }
            Err(HandshakeError::Transport(
                "chat service ended the stream during handshake".to_string(),
            ))
        })
        .await;

        let result = match wait {
            Ok(result) => result,
            Err(_) => Err(HandshakeError::Timeout(HANDSHAKE_TIMEOUT_SECS)),
        };

        if result.is_ok() {
            // セッション成立を確認できたのでハンドシェイク用ソケットは閉じる
            let _ = write.send(Message::Close(None)).await;
        }

        result
    }
}

#[async_trait]
impl RoomHandshake for WebSocketRoomHandshake {
    async fn establish(&self, request: &HandshakeRequest) -> Result<(), HandshakeError> {
        if request.create_new_room {
            self.create_room(request).await?;
        }
        self.join_room(request).await?;

        tracing::info!(
            "Handshake completed for room '{}'",
            request.room_id.as_str()
        );
        Ok(())
    }
}
