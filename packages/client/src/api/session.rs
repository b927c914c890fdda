//! Health, session lifecycle and client information endpoints.

use serde_json::Value;

use super::WhatsAppClient;
use crate::{
    domain::{ApiResponse, HttpMethod},
    error::ClientError,
};

impl WhatsAppClient {
    /// Health check.
    pub async fn ping(&self) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Get, "/ping", Value::Null, None).await
    }

    pub async fn start_session(&self, session_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/start/{sessionId}", session_id).await
    }

    pub async fn stop_session(&self, session_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/stop/{sessionId}", session_id).await
    }

    pub async fn get_session_status(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/status/{sessionId}", session_id).await
    }

    pub async fn restart_session(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/restart/{sessionId}", session_id).await
    }

    /// Log the session out and remove its stored credentials.
    pub async fn terminate_session(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/terminate/{sessionId}", session_id).await
    }

    /// QR code string to pair the session with a phone.
    pub async fn get_session_qr(&self, session_id: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/qr/{sessionId}", session_id).await
    }

    /// QR code rendered as an image by the API.
    pub async fn get_session_qr_image(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/session/qr/{sessionId}/image", session_id).await
    }

    /// URL a browser can open to see the QR image for `session_id`.
    pub fn session_qr_image_url(&self, session_id: Option<&str>) -> String {
        format!(
            "{}/session/qr/{}/image",
            self.base_url(),
            self.resolve_session(session_id)
        )
    }

    /// Names of every session known to the API.
    pub async fn get_sessions(&self) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Get, "/session/getSessions", Value::Null, None)
            .await
    }

    pub async fn get_client_state(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/client/getState/{sessionId}", session_id).await
    }

    pub async fn get_client_info(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/client/getClassInfo/{sessionId}", session_id).await
    }

    pub async fn get_wweb_version(
        &self,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.session_call("/client/getWWebVersion/{sessionId}", session_id).await
    }

    async fn session_call(
        &self,
        endpoint: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(HttpMethod::Get, endpoint, Value::Null, session_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::test_support::{client_with, expect_call},
        domain::{HttpMethod, RequestBody},
    };

    #[tokio::test]
    async fn test_session_endpoints_use_get_with_session_path() {
        // テスト項目: セッション系エンドポイントは GET でセッション ID をパスに埋め込む
        let client = client_with(expect_call(
            HttpMethod::Get,
            "/session/start/work",
            RequestBody::None,
        ));
        assert!(client.start_session(Some("work")).await.unwrap().is_successful());

        let client = client_with(expect_call(
            HttpMethod::Get,
            "/session/qr/default/image",
            RequestBody::None,
        ));
        client.get_session_qr_image(None).await.unwrap();

        let client = client_with(expect_call(
            HttpMethod::Get,
            "/session/terminate/default",
            RequestBody::None,
        ));
        client.terminate_session(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_and_session_list() {
        let client = client_with(expect_call(HttpMethod::Get, "/ping", RequestBody::None));
        client.ping().await.unwrap();

        let client = client_with(expect_call(
            HttpMethod::Get,
            "/session/getSessions",
            RequestBody::None,
        ));
        client.get_sessions().await.unwrap();
    }

    #[tokio::test]
    async fn test_client_info_endpoints() {
        let client = client_with(expect_call(
            HttpMethod::Get,
            "/client/getWWebVersion/s1",
            RequestBody::None,
        ));
        client.get_wweb_version(Some("s1")).await.unwrap();
    }

    #[test]
    fn test_qr_image_url() {
        let client = client_with(crate::api::test_support::no_calls());

        assert_eq!(
            client.session_qr_image_url(Some("work")),
            "http://wwebjs.test/session/qr/work/image"
        );
    }
}
