//! Message sending and message-level operations.
//!
//! `send_message` is the hub: every typed helper builds a [`MessageContent`]
//! and goes through it, so each content type gets its pre-flight check.

use serde_json::json;
use tracing::warn;

use super::{WhatsAppClient, require_chat_id};
use crate::{
    domain::{
        ApiResponse, HttpMethod, Location, MessageContent, MessageMedia, Options, Poll,
        ValidationError,
    },
    error::ClientError,
};

impl WhatsAppClient {
    /// Send any content type to `chat_id`.
    ///
    /// # Errors
    ///
    /// `ClientError::Validation` when the chat ID is blank or the content fails
    /// its check; no request is sent in that case.
    pub async fn send_message(
        &self,
        chat_id: &str,
        content: MessageContent,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        validate_outgoing(chat_id, &content)?;
        self.request(
            HttpMethod::Post,
            "/client/sendMessage/{sessionId}",
            json!({
                "chatId": chat_id,
                "contentType": content.content_type(),
                "content": content.to_content(),
                "options": options,
            }),
            session_id,
        )
        .await
    }

    pub async fn send_text_message(
        &self,
        chat_id: &str,
        text: &str,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.send_message(chat_id, MessageContent::from(text), options, session_id)
            .await
    }

    pub async fn send_media_message(
        &self,
        chat_id: &str,
        media: MessageMedia,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.send_message(chat_id, MessageContent::Media(media), options, session_id)
            .await
    }

    /// Let the API download `url` and send it as media.
    pub async fn send_media_from_url(
        &self,
        chat_id: &str,
        url: &str,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.send_message(
            chat_id,
            MessageContent::MediaFromUrl(url.to_string()),
            options,
            session_id,
        )
        .await
    }

    pub async fn send_location_message(
        &self,
        chat_id: &str,
        latitude: f64,
        longitude: f64,
        description: &str,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let location = Location {
            latitude,
            longitude,
            description: description.to_string(),
        };
        self.send_message(chat_id, MessageContent::Location(location), options, session_id)
            .await
    }

    /// Share the contact card of `contact_id`.
    pub async fn send_contact_message(
        &self,
        chat_id: &str,
        contact_id: &str,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let content = MessageContent::Contact {
            contact_id: contact_id.to_string(),
        };
        self.send_message(chat_id, content, options, session_id)
            .await
    }

    pub async fn send_poll_message(
        &self,
        chat_id: &str,
        poll_name: &str,
        poll_options: Vec<String>,
        poll_settings: Options,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let poll = Poll {
            name: poll_name.to_string(),
            options: poll_options,
            settings: poll_settings,
        };
        self.send_message(chat_id, MessageContent::Poll(poll), options, session_id)
            .await
    }

    /// Quote `message_id` and answer with `content`.
    pub async fn reply_to_message(
        &self,
        chat_id: &str,
        message_id: &str,
        content: MessageContent,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        validate_outgoing(chat_id, &content)?;
        self.request(
            HttpMethod::Post,
            "/message/reply/{sessionId}",
            json!({
                "chatId": chat_id,
                "messageId": message_id,
                "contentType": content.content_type(),
                "content": content.to_content(),
                "options": options,
            }),
            session_id,
        )
        .await
    }

    /// React with an emoji; an empty `reaction` removes the current one.
    pub async fn react_to_message(
        &self,
        chat_id: &str,
        message_id: &str,
        reaction: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        self.request(
            HttpMethod::Post,
            "/message/react/{sessionId}",
            json!({
                "chatId": chat_id,
                "messageId": message_id,
                "reaction": reaction,
            }),
            session_id,
        )
        .await
    }

    pub async fn quick_react(
        &self,
        chat_id: &str,
        message_id: &str,
        emoji: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.react_to_message(chat_id, message_id, emoji, session_id)
            .await
    }

    pub async fn remove_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.react_to_message(chat_id, message_id, "", session_id)
            .await
    }

    pub async fn delete_message(
        &self,
        chat_id: &str,
        message_id: &str,
        for_everyone: bool,
        clear_media: bool,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        self.request(
            HttpMethod::Post,
            "/message/delete/{sessionId}",
            json!({
                "chatId": chat_id,
                "messageId": message_id,
                "everyone": for_everyone,
                "clearMedia": clear_media,
            }),
            session_id,
        )
        .await
    }

    pub async fn download_message_media(
        &self,
        chat_id: &str,
        message_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.message_call("/message/downloadMedia/{sessionId}", chat_id, message_id, session_id)
            .await
    }

    /// Delivery and read information for one message.
    pub async fn get_message_info(
        &self,
        chat_id: &str,
        message_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.message_call("/message/getInfo/{sessionId}", chat_id, message_id, session_id)
            .await
    }

    pub async fn search_messages(
        &self,
        query: &str,
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Post,
            "/client/searchMessages/{sessionId}",
            json!({ "query": query, "options": options }),
            session_id,
        )
        .await
    }

    async fn message_call(
        &self,
        endpoint: &str,
        chat_id: &str,
        message_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        self.request(
            HttpMethod::Post,
            endpoint,
            json!({ "chatId": chat_id, "messageId": message_id }),
            session_id,
        )
        .await
    }
}

fn validate_outgoing(chat_id: &str, content: &MessageContent) -> Result<(), ValidationError> {
    require_chat_id(chat_id)?;
    content.validate().inspect_err(|e| {
        warn!(
            content_type = content.content_type(),
            "Rejected outgoing message to '{}': {}", chat_id, e
        );
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        api::test_support::{client_with, expect_call, json, no_calls},
        domain::{HttpMethod, MessageContent, MessageMedia, Options, ValidationError},
        error::ClientError,
    };

    #[tokio::test]
    async fn test_send_text_message() {
        // テスト項目: テキスト送信は contentType=string で sendMessage を呼ぶ
        // given (前提条件):
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/client/sendMessage/default",
            json(json!({
                "chatId": "1234567890@c.us",
                "contentType": "string",
                "content": "Hello",
                "options": {}
            })),
        ));

        // when (操作):
        let response = client
            .send_text_message("1234567890@c.us", "Hello", Options::new(), None)
            .await;

        // then (期待する結果):
        assert!(response.unwrap().is_successful());
    }

    #[tokio::test]
    async fn test_send_location_message_payload() {
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/client/sendMessage/default",
            json(json!({
                "chatId": "1234567890@c.us",
                "contentType": "Location",
                "content": {"latitude": -6.2088, "longitude": 106.8456, "description": "Jakarta"},
                "options": {}
            })),
        ));

        client
            .send_location_message("1234567890@c.us", -6.2088, 106.8456, "Jakarta", Options::new(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_content_fails_fast() {
        // テスト項目: 検証に失敗したメッセージはネットワークに送られない
        let client = client_with(no_calls());

        let bad_location = client
            .send_location_message("1@c.us", 91.0, 0.0, "", Options::new(), None)
            .await;
        let bad_url = client
            .send_media_from_url("1@c.us", "not a url", Options::new(), None)
            .await;
        let bad_poll = client
            .send_poll_message("1@c.us", "Q", vec![], Options::new(), Options::new(), None)
            .await;
        let bad_media = client
            .send_media_message("1@c.us", MessageMedia::new("image/png", ""), Options::new(), None)
            .await;
        let blank_chat = client
            .send_text_message("", "hi", Options::new(), None)
            .await;

        assert!(matches!(
            bad_location,
            Err(ClientError::Validation(ValidationError::InvalidCoordinates { .. }))
        ));
        assert!(matches!(
            bad_url,
            Err(ClientError::Validation(ValidationError::InvalidUrl(_)))
        ));
        assert!(matches!(
            bad_poll,
            Err(ClientError::Validation(ValidationError::InvalidPollOptions { .. }))
        ));
        assert!(matches!(
            bad_media,
            Err(ClientError::Validation(ValidationError::InvalidMediaData))
        ));
        assert!(matches!(
            blank_chat,
            Err(ClientError::Validation(ValidationError::EmptyChatId))
        ));
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_forwarded() {
        // テスト項目: 未知の contentType は検証なしでそのまま送信される
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/client/sendMessage/default",
            json(json!({
                "chatId": "1@c.us",
                "contentType": "Sticker",
                "content": {"anything": 1},
                "options": {}
            })),
        ));

        client
            .send_message(
                "1@c.us",
                MessageContent::Other {
                    content_type: "Sticker".into(),
                    content: json!({"anything": 1}),
                },
                Options::new(),
                None,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reply_react_delete_payloads() {
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/message/reply/default",
            json(json!({
                "chatId": "1@c.us",
                "messageId": "m1",
                "contentType": "string",
                "content": "ok",
                "options": {}
            })),
        ));
        client
            .reply_to_message("1@c.us", "m1", "ok".into(), Options::new(), None)
            .await
            .unwrap();

        let client = client_with(expect_call(
            HttpMethod::Post,
            "/message/react/default",
            json(json!({"chatId": "1@c.us", "messageId": "m1", "reaction": ""})),
        ));
        client.remove_reaction("1@c.us", "m1", None).await.unwrap();

        let client = client_with(expect_call(
            HttpMethod::Post,
            "/message/delete/default",
            json(json!({"chatId": "1@c.us", "messageId": "m1", "everyone": true, "clearMedia": false})),
        ));
        client
            .delete_message("1@c.us", "m1", true, false, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_search_messages() {
        let mut options = Options::new();
        options.insert("limit".into(), json!(5));
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/client/searchMessages/default",
            json(json!({"query": "invoice", "options": {"limit": 5}})),
        ));

        client.search_messages("invoice", options, None).await.unwrap();
    }
}
