//! Own-profile endpoints.

use serde_json::json;

use super::WhatsAppClient;
use crate::{
    domain::{ApiResponse, HttpMethod, ValidationError, validation::is_valid_media_data},
    error::ClientError,
};

impl WhatsAppClient {
    /// Set the "about" status text of the logged-in account.
    pub async fn set_status(
        &self,
        status: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        self.request(
            HttpMethod::Post,
            "/client/setStatus/{sessionId}",
            json!({ "status": status }),
            session_id,
        )
        .await
    }

    /// Replace the profile picture with base64 `data` of type `mimetype`.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidMediaData` when `data` is not base64 or
    /// `mimetype` is blank.
    pub async fn set_profile_picture(
        &self,
        mimetype: &str,
        data: &str,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        if !is_valid_media_data(&json!({ "mimetype": mimetype, "data": data })) {
            return Err(ValidationError::InvalidMediaData.into());
        }
        self.request(
            HttpMethod::Post,
            "/client/setProfilePicture/{sessionId}",
            json!({ "pictureMimetype": mimetype, "pictureData": data }),
            session_id,
        )
        .await
    }
}
