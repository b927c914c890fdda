//! Group management endpoints.

use serde_json::{Value, json};

use super::{WhatsAppClient, require_chat_id};
use crate::{
    domain::{ApiResponse, HttpMethod, Options},
    error::ClientError,
};

impl WhatsAppClient {
    /// Create a group named `title` with the given participant IDs.
    pub async fn create_group(
        &self,
        title: &str,
        participants: &[String],
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Post,
            "/client/createGroup/{sessionId}",
            json!({
                "title": title,
                "participants": participants,
                "options": options,
            }),
            session_id,
        )
        .await
    }

    pub async fn get_group_invite_code(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.group_call("getInviteCode", chat_id, None, session_id)
            .await
    }

    pub async fn add_group_participants(
        &self,
        chat_id: &str,
        participant_ids: &[String],
        options: Options,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let extra = json!({ "participantIds": participant_ids, "options": options });
        self.group_call("addParticipants", chat_id, Some(extra), session_id)
            .await
    }

    pub async fn remove_group_participants(
        &self,
        chat_id: &str,
        participant_ids: &[String],
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let extra = json!({ "participantIds": participant_ids });
        self.group_call("removeParticipants", chat_id, Some(extra), session_id)
            .await
    }

    pub async fn promote_group_participants(
        &self,
        chat_id: &str,
        participant_ids: &[String],
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let extra = json!({ "participantIds": participant_ids });
        self.group_call("promoteParticipants", chat_id, Some(extra), session_id)
            .await
    }

    pub async fn demote_group_participants(
        &self,
        chat_id: &str,
        participant_ids: &[String],
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let extra = json!({ "participantIds": participant_ids });
        self.group_call("demoteParticipants", chat_id, Some(extra), session_id)
            .await
    }

    pub async fn set_group_subject(
        &self,
        chat_id: &str,
        subject: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.group_call("setSubject", chat_id, Some(json!({ "subject": subject })), session_id)
            .await
    }

    pub async fn set_group_description(
        &self,
        chat_id: &str,
        description: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let extra = json!({ "description": description });
        self.group_call("setDescription", chat_id, Some(extra), session_id)
            .await
    }

    pub async fn leave_group(
        &self,
        chat_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.group_call("leave", chat_id, None, session_id).await
    }

    /// POST `/groupChat/{action}/{sessionId}` with `chatId` merged into `extra`.
    async fn group_call(
        &self,
        action: &str,
        chat_id: &str,
        extra: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        require_chat_id(chat_id)?;
        let mut payload = json!({ "chatId": chat_id });
        if let (Some(Value::Object(fields)), Value::Object(target)) = (extra, &mut payload) {
            target.extend(fields);
        }
        let endpoint = format!("/groupChat/{action}/{{sessionId}}");
        self.request(HttpMethod::Post, &endpoint, payload, session_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        api::test_support::{client_with, expect_call, json, no_calls},
        domain::{HttpMethod, Options, ValidationError},
        error::ClientError,
    };

    #[tokio::test]
    async fn test_create_group() {
        // テスト項目: グループ作成はタイトルと参加者を送信する
        // given (前提条件):
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/client/createGroup/default",
            json(json!({
                "title": "Team",
                "participants": ["111@c.us", "222@c.us"],
                "options": {}
            })),
        ));
        let participants = vec!["111@c.us".to_string(), "222@c.us".to_string()];

        // when (操作):
        let response = client
            .create_group("Team", &participants, Options::new(), None)
            .await;

        // then (期待する結果):
        assert!(response.unwrap().is_successful());
    }

    #[tokio::test]
    async fn test_participant_operations_carry_ids() {
        let ids = vec!["111@c.us".to_string()];

        let client = client_with(expect_call(
            HttpMethod::Post,
            "/groupChat/promoteParticipants/work",
            json(json!({"chatId": "g1@g.us", "participantIds": ["111@c.us"]})),
        ));
        client
            .promote_group_participants("g1@g.us", &ids, Some("work"))
            .await
            .unwrap();

        let client = client_with(expect_call(
            HttpMethod::Post,
            "/groupChat/addParticipants/default",
            json(json!({"chatId": "g1@g.us", "participantIds": ["111@c.us"], "options": {}})),
        ));
        client
            .add_group_participants("g1@g.us", &ids, Options::new(), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_subject_and_leave() {
        let client = client_with(expect_call(
            HttpMethod::Post,
            "/groupChat/setSubject/default",
            json(json!({"chatId": "g1@g.us", "subject": "New name"})),
        ));
        client
            .set_group_subject("g1@g.us", "New name", None)
            .await
            .unwrap();

        let client = client_with(expect_call(
            HttpMethod::Post,
            "/groupChat/leave/default",
            json(json!({"chatId": "g1@g.us"})),
        ));
        client.leave_group("g1@g.us", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_group_id_is_rejected() {
        let client = client_with(no_calls());

        let result = client.get_group_invite_code("  ", None).await;

        assert!(matches!(
            result,
            Err(ClientError::Validation(ValidationError::EmptyChatId))
        ));
    }
}
