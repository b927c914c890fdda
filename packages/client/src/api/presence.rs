//! Chat presence indicators.

use serde_json::json;

use super::{WhatsAppClient, require_chat_id};
use crate::{
    domain::{ApiResponse, HttpMethod},
    error::ClientError,
};

impl WhatsAppClient {
    /// Show "typing..." in `chat_id`.
    pub async fn send_typing(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.presence_call("/chat/sendStateTyping/{sessionId}", chat_id, session_id)
            .await
    }

    /// Show "recording audio..." in `chat_id`.
    pub async fn send_recording(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.presence_call("/chat/sendStateRecording/{sessionId}", chat_id, session_id)
            .await
    }

    pub async fn clear_chat_state(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.presence_call("/chat/clearState/{sessionId}", chat_id, session_id)
            .await
    }

    async fn presence_call(
        &self,
        endpoint: &str,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        self.request(HttpMethod::Post, endpoint, json!({ "chatId": chat_id }), session_id)
            .await
    }
}
