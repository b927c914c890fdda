//! Chat listing endpoints.

use serde_json::{Value, json};

use super::{WhatsAppClient, require_chat_id};
use crate::{
    domain::{ApiResponse, HttpMethod, Options},
    error::ClientError,
};

impl WhatsAppClient {
    /// All chats. A non-empty `search_options` switches to the POST variant.
    pub async fn get_chats(
        &self,
        search_options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        if search_options.is_empty() {
            self.request(
                HttpMethod::Get,
                "/client/getChats/{sessionId}",
                Value::Null,
                session_id,
            )
            .await
        } else {
            self.request(
                HttpMethod::Post,
                "/client/getChats/{sessionId}",
                json!({ "searchOptions": search_options }),
                session_id,
            )
            .await
        }
    }

    pub async fn get_chat_by_id(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        self.request(
            HttpMethod::Post,
            "/client/getChatById/{sessionId}",
            json!({ "chatId": chat_id }),
            session_id,
        )
        .await
    }

    /// Send read receipts for the chat.
    pub async fn mark_chat_as_seen(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        self.request(
            HttpMethod::Post,
            "/client/sendSeen/{sessionId}",
            json!({ "chatId": chat_id }),
            session_id,
        )
        .await
    }
}
