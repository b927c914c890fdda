//! Fake wwebjs-api server for integration tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wwebjs_client::{ClientConfig, WhatsAppClient};

pub const API_KEY: &str = "test-key";

#[derive(Default)]
struct Hits {
    contacts: AtomicUsize,
    status: AtomicUsize,
}

/// A running fake API bound to an ephemeral local port.
pub struct FakeApi {
    base_url: String,
    hits: Arc<Hits>,
}

impl FakeApi {
    pub async fn start() -> Self {
        let hits = Arc::new(Hits::default());
        let app = Router::new()
            .route("/ping", get(ping))
            .route("/session/status/{session_id}", get(session_status))
            .route("/session/stop/{session_id}", get(session_stop))
            .route("/client/getContacts/{session_id}", get(contacts))
            .route("/client/getState/{session_id}", get(broken_body))
            .route("/client/getChats/{session_id}", get(chats))
            .route("/client/sendMessage/{session_id}", post(send_message))
            .with_state(hits.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake API");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake API crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn contact_hits(&self) -> usize {
        self.hits.contacts.load(Ordering::SeqCst)
    }

    pub fn status_hits(&self) -> usize {
        self.hits.status.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_key: Some(API_KEY.to_string()),
            ..ClientConfig::new(self.base_url.clone())
        }
    }

    pub fn client(&self) -> WhatsAppClient {
        WhatsAppClient::from_config(self.config()).expect("Failed to build client")
    }

    pub fn cached_client(&self) -> WhatsAppClient {
        let config = ClientConfig {
            enable_cache: true,
            ..self.config()
        };
        WhatsAppClient::from_config(config).expect("Failed to build client")
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("x-api-key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

async fn ping() -> Json<Value> {
    Json(json!({"success": true, "message": "pong"}))
}

async fn session_status(
    State(hits): State<Arc<Hits>>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    hits.status.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"success": false, "error": "Invalid API key"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "state": "CONNECTED", "message": format!("{session_id} connected")})),
    )
}

async fn session_stop(Path(session_id): Path<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "error": format!("session {session_id} not found")})),
    )
}

async fn contacts(State(hits): State<Arc<Hits>>) -> Json<Value> {
    hits.contacts.fetch_add(1, Ordering::SeqCst);
    Json(json!({"success": true, "contacts": [
        {"name": "Alice", "id": {"user": "111", "_serialized": "111@c.us"}},
        {"name": "Bob", "id": {"user": "222", "_serialized": "222@c.us"}}
    ]}))
}

async fn broken_body() -> &'static str {
    "<html>upstream error</html>"
}

async fn chats() -> Json<Value> {
    Json(json!({"success": true, "chats": [
        {"id": {"_serialized": "g1@g.us"}, "name": "Team", "isGroup": true, "unreadCount": 3,
         "lastMessage": {"body": "standup?", "timestamp": 1_700_000_300}},
        {"id": {"_serialized": "111@c.us"}, "name": "Alice", "isGroup": false, "unreadCount": 0,
         "lastMessage": {"body": "ok", "timestamp": 1_700_000_100}, "archived": true}
    ]}))
}

async fn send_message(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"success": false, "error": "Invalid API key"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": {"id": {"_serialized": "msg-1"}}, "received": body})),
    )
}
