//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::{domain::validation::is_valid_session_id, error::ClientError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_ID: &str = "default";
/// Name of the built-in in-memory cache component.
pub const MEMORY_CACHE_COMPONENT: &str = "memory";

/// Settings consumed when a [`WhatsAppClient`](crate::WhatsAppClient) is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the wwebjs-api service
    pub base_url: String,
    /// Sent as `x-api-key` when set
    pub api_key: Option<String>,
    /// Session used when an operation is given none
    pub default_session_id: String,
    /// Per-request timeout in seconds
    pub timeout: u64,
    pub enable_cache: bool,
    /// Name of the cache component to use when caching is enabled
    pub cache_component: String,
    /// Cache entry lifetime in seconds
    pub cache_ttl: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            default_session_id: DEFAULT_SESSION_ID.to_string(),
            timeout: 30,
            enable_cache: false,
            cache_component: MEMORY_CACHE_COMPONENT.to_string(),
            cache_ttl: 300,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Base URL without trailing slashes, or a configuration error.
    pub fn validated_base_url(&self) -> Result<String, ClientError> {
        let base_url = self.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config(
                "the \"baseUrl\" property must be set".to_string(),
            ));
        }
        url::Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid baseUrl {base_url:?}: {e}")))?;
        if !is_valid_session_id(&self.default_session_id) {
            return Err(ClientError::Config(format!(
                "invalid defaultSessionId {:?}",
                self.default_session_id
            )));
        }
        Ok(base_url.to_string())
    }
}
