//! Test servers: a fake wwebjs-api and the room service in front of it.

use std::sync::Arc;

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wwebjs_client::{ClientConfig, WhatsAppClient};
use wwebjs_server::{create_router, ui::state::AppState};

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server crashed");
    });
    format!("http://{addr}")
}

async fn chats(Path(session_id): Path<String>) -> (StatusCode, Json<Value>) {
    match session_id.as_str() {
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": "session not connected"})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({"success": true, "chats": [
                {"id": {"_serialized": "g1@g.us"}, "name": "Family", "isGroup": true,
                 "unreadCount": 5, "pinned": true,
                 "lastMessage": {"body": "dinner at 8", "timestamp": 1_700_000_300}},
                {"id": {"_serialized": "111@c.us"}, "name": "Alice", "isGroup": false,
                 "unreadCount": 0, "archived": true,
                 "lastMessage": {"body": "ok", "timestamp": 1_700_000_100}},
                {"id": {"_serialized": "g2@g.us"}, "name": "Work <Team>", "isGroup": true,
                 "unreadCount": 1, "isMuted": true,
                 "lastMessage": {"body": "deploy done", "timestamp": 1_700_000_200}},
                {"id": {"_serialized": "222@c.us"}, "name": "Bob", "isGroup": false,
                 "unreadCount": 2,
                 "lastMessage": {"body": "call me", "timestamp": 1_700_000_400}}
            ]})),
        ),
    }
}

/// Room service wired to a fake wwebjs-api.
pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub async fn start() -> Self {
        let api = Router::new().route("/client/getChats/{session_id}", get(chats));
        let api_url = spawn(api).await;
        Self::with_api(&api_url).await
    }

    /// Room service whose API is unreachable.
    pub async fn without_api() -> Self {
        Self::with_api("http://127.0.0.1:9").await
    }

    async fn with_api(api_url: &str) -> Self {
        let client = WhatsAppClient::from_config(ClientConfig::new(api_url))
            .expect("Failed to build client");
        let app = create_router(Arc::new(AppState::new(Arc::new(client))));
        Self {
            base_url: spawn(app).await,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        reqwest::get(format!("{}{}", self.base_url, path_and_query))
            .await
            .expect("Failed to send request")
    }

    pub async fn get_json(&self, path_and_query: &str) -> (u16, Value) {
        let response = self.get(path_and_query).await;
        let status = response.status().as_u16();
        let body = response.json().await.expect("Failed to parse JSON");
        (status, body)
    }
}

/// IDs of the rooms in a JSON list response.
pub fn ids(rooms: &Value) -> Vec<&str> {
    rooms
        .as_array()
        .expect("rooms should be an array")
        .iter()
        .map(|room| room["id"].as_str().unwrap_or_default())
        .collect()
}
