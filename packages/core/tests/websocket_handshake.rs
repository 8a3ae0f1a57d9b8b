//! Integration tests for the WebSocket handshake against an in-process
//! stub of the chat backend (REST room creation + `/ws` upgrade).

use axum::Json;
use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::{get, post};

use tsunagi_core::domain::{
    HandshakeError, HandshakeRequest, RoomHandshake, RoomIdFactory, Timestamp, UserId,
    UserIdentity,
};
use tsunagi_core::infrastructure::dto::http::{CreateRoomRequest, CreateRoomResponse};
use tsunagi_core::infrastructure::handshake::WebSocketRoomHandshake;

fn create_test_request(create_new_room: bool) -> HandshakeRequest {
    let user_id = UserId::new("alice".to_string()).unwrap();
    let room_id = RoomIdFactory::generate(&user_id, Timestamp::new(1700000000000));
    HandshakeRequest {
        room_id,
        identity: UserIdentity::new(
            user_id,
            "Alice".to_string(),
            "alice@example.com".to_string(),
        ),
        create_new_room,
    }
}

async fn create_room(Json(body): Json<CreateRoomRequest>) -> Json<CreateRoomResponse> {
    Json(CreateRoomResponse {
        room_id: body.room_id,
        created_at: 1700000000000,
    })
}

async fn ws_accept(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(accept_join)
}

async fn ws_reject(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(reject_join)
}

/// join を読み取り room_ready を返す
async fn accept_join(mut socket: WebSocket) {
    if let Some(Ok(Message::Text(text))) = socket.recv().await {
        let join: serde_json::Value = serde_json::from_str(&text).unwrap();
        let reply = serde_json::json!({
            "type": "room_ready",
            "room_id": join["room_id"],
            "joined_at": 1700000000000i64,
        });
        let _ = socket.send(Message::Text(reply.to_string().into())).await;
    }
}

/// join を読み取り error を返す
async fn reject_join(mut socket: WebSocket) {
    if let Some(Ok(Message::Text(_))) = socket.recv().await {
        let reply = serde_json::json!({
            "type": "error",
            "message": "room is closed",
        });
        let _ = socket.send(Message::Text(reply.to_string().into())).await;
    }
}

/// スタブサーバーを起動してアドレスを返す
async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

#[tokio::test]
async fn test_handshake_succeeds_against_conforming_backend() {
    // テスト項目: ルーム作成 → join → room_ready の一連の流れが成功する
    // given (前提条件):
    let app = Router::new()
        .route("/api/rooms", post(create_room))
        .route("/ws", get(ws_accept));
    let addr = spawn_stub(app).await;
    let handshake =
        WebSocketRoomHandshake::new(format!("http://{addr}"), format!("ws://{addr}/ws"));

    // when (操作):
    let result = handshake.establish(&create_test_request(true)).await;

    // then (期待する結果):
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_handshake_skips_room_creation_when_joining_existing_room() {
    // テスト項目: create_new_room = false なら REST のルーム作成を呼ばない
    // given (前提条件): /api/rooms を持たないスタブ（呼べば 404 で失敗する）
    let app = Router::new().route("/ws", get(ws_accept));
    let addr = spawn_stub(app).await;
    let handshake =
        WebSocketRoomHandshake::new(format!("http://{addr}"), format!("ws://{addr}/ws"));

    // when (操作):
    let result = handshake.establish(&create_test_request(false)).await;

    // then (期待する結果): REST を経由しないため成功する
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_rejection_message_maps_to_rejected_error() {
    // テスト項目: チャットサービスの error 応答が Rejected エラーになる
    // given (前提条件):
    let app = Router::new()
        .route("/api/rooms", post(create_room))
        .route("/ws", get(ws_reject));
    let addr = spawn_stub(app).await;
    let handshake =
        WebSocketRoomHandshake::new(format!("http://{addr}"), format!("ws://{addr}/ws"));

    // when (操作):
    let result = handshake.establish(&create_test_request(true)).await;

    // then (期待する結果):
    assert!(matches!(
        result,
        Err(HandshakeError::Rejected(message)) if message == "room is closed"
    ));
}

#[tokio::test]
async fn test_room_creation_failure_maps_to_room_setup_error() {
    // テスト項目: ルーム作成が失敗ステータスを返すと RoomSetup エラーになる
    // given (前提条件): /api/rooms を持たないスタブ（404 が返る）
    let app = Router::new().route("/ws", get(ws_accept));
    let addr = spawn_stub(app).await;
    let handshake =
        WebSocketRoomHandshake::new(format!("http://{addr}"), format!("ws://{addr}/ws"));

    // when (操作):
    let result = handshake.establish(&create_test_request(true)).await;

    // then (期待する結果):
    assert!(matches!(result, Err(HandshakeError::RoomSetup(_))));
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_transport_error() {
    // テスト項目: 到達不能なバックエンドが Transport エラーになる
    // given (前提条件): 誰も待ち受けていないポート
    let handshake = WebSocketRoomHandshake::new("http://127.0.0.1:1", "ws://127.0.0.1:1/ws");

    // when (操作): ルーム作成をスキップしてトランスポート確立から始める
    let result = handshake.establish(&create_test_request(false)).await;

    // then (期待する結果):
    assert!(matches!(result, Err(HandshakeError::Transport(_))));
}
