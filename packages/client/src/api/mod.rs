//! WhatsApp Web REST API client.
//!
//! [`WhatsAppClient::request`] is the single pipeline every endpoint goes
//! through: resolve the session, consult the cache, send one request, wrap the
//! response. The endpoint methods live in the submodules, grouped by area.

mod chat;
mod contact;
mod group;
mod message;
mod presence;
mod profile;
mod session;

use std::{sync::Arc, time::Duration};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::{ClientConfig, MEMORY_CACHE_COMPONENT},
    domain::{
        ApiResponse, CacheStore, HttpMethod, HttpRequest, HttpTransport, RequestBody,
        ValidationError, cache_key, should_cache, validation::is_valid_session_id,
    },
    error::ClientError,
    infrastructure::{InMemoryCache, ReqwestTransport},
};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Placeholder substituted with the effective session ID.
pub const SESSION_PLACEHOLDER: &str = "{sessionId}";

pub struct WhatsAppClient {
    base_url: String,
    api_key: Option<String>,
    default_session_id: String,
    timeout: Duration,
    cache: Option<Arc<dyn CacheStore>>,
    cache_ttl: Duration,
    transport: Arc<dyn HttpTransport>,
}

impl WhatsAppClient {
    /// Build a client from explicit collaborators.
    ///
    /// `cache` is only used when `config.enable_cache` is set. Enabling the
    /// cache without providing one logs a warning and runs uncached.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` when the base URL is empty or malformed,
    /// or the default session ID is not a valid session ID.
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        cache: Option<Arc<dyn CacheStore>>,
    ) -> Result<Self, ClientError> {
        let base_url = config.validated_base_url()?;
        let cache = if config.enable_cache {
            if cache.is_none() {
                warn!(
                    "Cache component '{}' not found, requests will not be cached",
                    config.cache_component
                );
            }
            cache
        } else {
            None
        };

        let timeout = config.timeout();
        let cache_ttl = config.cache_ttl();
        Ok(Self {
            base_url,
            api_key: config.api_key.filter(|key| !key.is_empty()),
            default_session_id: config.default_session_id,
            timeout,
            cache,
            cache_ttl,
            transport,
        })
    }

    /// Build a client with the reqwest transport and, when enabled, the
    /// in-memory cache.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let cache: Option<Arc<dyn CacheStore>> =
            if config.enable_cache && config.cache_component == MEMORY_CACHE_COMPONENT {
                Some(Arc::new(InMemoryCache::new()))
            } else {
                None
            };
        Self::new(config, Arc::new(ReqwestTransport::new()), cache)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_session_id(&self) -> &str {
        &self.default_session_id
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// `session_id` or the configured default.
    pub fn resolve_session<'a>(&'a self, session_id: Option<&'a str>) -> &'a str {
        session_id.unwrap_or(&self.default_session_id)
    }

    /// Execute one API operation.
    ///
    /// `endpoint` may contain `{sessionId}`. `payload` is an object or `Null`.
    ///
    /// A received response always yields `Ok`, successful or not. Only a
    /// failed exchange (network error, timeout, unparseable body) yields
    /// `ClientError::RequestFailed`. Nothing is retried.
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Value,
        session_id: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let session_id = self.resolve_session(session_id);
        let endpoint = if endpoint.contains(SESSION_PLACEHOLDER) {
            if !is_valid_session_id(session_id) {
                return Err(ValidationError::InvalidSessionId(session_id.to_string()).into());
            }
            endpoint.replace(SESSION_PLACEHOLDER, session_id)
        } else {
            endpoint.to_string()
        };

        let cached = match &self.cache {
            Some(cache) if should_cache(method, &endpoint) => {
                Some((cache, cache_key(method, &endpoint, &payload, session_id)))
            }
            _ => None,
        };
        if let Some((cache, key)) = &cached {
            if let Some(hit) = cache.get(key).await {
                debug!(%method, %endpoint, "Cache hit");
                return Ok(hit);
            }
        }

        debug!(%method, %endpoint, "Sending API request");
        let request = self.build_request(method, &endpoint, payload);

        match self.transport.send(request).await {
            Ok(raw) => {
                let response = ApiResponse::from_status(raw.status, raw.body);
                if !response.is_successful() {
                    debug!(%method, %endpoint, status = response.status_code, "API rejected request");
                }
                if let Some((cache, key)) = &cached {
                    if response.is_successful() {
                        cache.set(key, response.clone(), self.cache_ttl).await;
                        info!(%endpoint, ttl = ?self.cache_ttl, "Cached API response");
                    }
                }
                Ok(response)
            }
            Err(e) => {
                if let Some((cache, key)) = &cached {
                    cache.delete(key).await;
                }
                warn!(%method, %endpoint, "API request failed: {}", e);
                Err(ClientError::RequestFailed(e))
            }
        }
    }

    fn build_request(&self, method: HttpMethod, endpoint: &str, payload: Value) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(api_key) = &self.api_key {
            headers.push((API_KEY_HEADER.to_string(), api_key.clone()));
        }

        let body = if method.is_mutating() {
            match payload {
                Value::Null => RequestBody::Json(Value::Object(Default::default())),
                payload => RequestBody::Json(payload),
            }
        } else {
            match query_pairs(&payload) {
                pairs if pairs.is_empty() => RequestBody::None,
                pairs => RequestBody::Query(pairs),
            }
        };

        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            headers,
            body,
            timeout: self.timeout,
        }
    }
}

/// Flatten the top level of an object payload into query parameters.
fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let Some(map) = payload.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Reject blank chat IDs before building a request.
fn require_chat_id(chat_id: &str) -> Result<(), ValidationError> {
    if chat_id.trim().is_empty() {
        return Err(ValidationError::EmptyChatId);
    }
    Ok(())
}
