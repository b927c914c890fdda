//! Contact lookup and management endpoints.

use serde_json::{Value, json};

use super::WhatsAppClient;
use crate::{
    domain::{ApiResponse, HttpMethod},
    error::ClientError,
};

impl WhatsAppClient {
    pub async fn get_contacts(&self, session_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Get,
            "/client/getContacts/{sessionId}",
            Value::Null,
            session_id,
        )
        .await
    }

    pub async fn get_contact_by_id(
        &self,
        contact_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.contact_call("/client/getContactById/{sessionId}", contact_id, session_id)
            .await
    }

    /// Whether `number` has a WhatsApp account.
    pub async fn is_registered_user(
        &self,
        number: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Post,
            "/client/isRegisteredUser/{sessionId}",
            json!({ "number": number }),
            session_id,
        )
        .await
    }

    pub async fn get_profile_pic_url(
        &self,
        contact_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.contact_call("/client/getProfilePicUrl/{sessionId}", contact_id, session_id)
            .await
    }

    pub async fn get_blocked_contacts(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Post,
            "/client/getBlockedContacts/{sessionId}",
            Value::Null,
            session_id,
        )
        .await
    }

    pub async fn block_contact(
        &self,
        contact_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.contact_call("/contact/block/{sessionId}", contact_id, session_id)
            .await
    }

    pub async fn unblock_contact(
        &self,
        contact_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.contact_call("/contact/unblock/{sessionId}", contact_id, session_id)
            .await
    }

    /// The contact's "about" text.
    pub async fn get_contact_about(
        &self,
        contact_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.contact_call("/contact/getAbout/{sessionId}", contact_id, session_id)
            .await
    }

    async fn contact_call(
        &self,
        endpoint: &str,
        contact_id: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Post,
            endpoint,
            json!({ "contactId": contact_id }),
            session_id,
        )
        .await
    }
}
