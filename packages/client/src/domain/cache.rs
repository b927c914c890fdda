//! Response cache seam and the policy deciding what may be cached.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{response::ApiResponse, transport::HttpMethod};

/// Read-only endpoints whose GET responses may be served from cache.
pub const CACHEABLE_ENDPOINTS: [&str; 6] = [
    "/client/getContacts",
    "/client/getChats",
    "/session/status",
    "/client/getState",
    "/client/getClassInfo",
    "/client/getWWebVersion",
];

/// Key/value store for envelopes with per-entry expiry.
///
/// Atomicity of each call is up to the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Live entry for `key`, `None` when missing or expired.
    async fn get(&self, key: &str) -> Option<ApiResponse>;

    async fn set(&self, key: &str, value: ApiResponse, ttl: Duration);

    async fn delete(&self, key: &str);
}

/// GET on one of [`CACHEABLE_ENDPOINTS`]. Mutating calls are never cached.
///
/// `endpoint` is matched on whole path segments, so `/client/getChats/abc`
/// is cacheable but `/client/getChatsById/abc` is not.
pub fn should_cache(method: HttpMethod, endpoint: &str) -> bool {
    if method != HttpMethod::Get {
        return false;
    }
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    CACHEABLE_ENDPOINTS.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Deterministic key for (method, endpoint, session, payload).
///
/// The payload is hashed with SHA-256 over its JSON serialization. Object keys
/// serialize in sorted order, so equal payloads always hash the same.
pub fn cache_key(method: HttpMethod, endpoint: &str, payload: &Value, session_id: &str) -> String {
    let normalized: String = endpoint
        .chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .map(|c| if c == '/' { '_' } else { c })
        .collect();
    let serialized = serde_json::to_string(payload).unwrap_or_default();
    let digest = hex::encode(Sha256::digest(serialized.as_bytes()));

    format!(
        "whatsapp_api_{}_{}_{}_{}",
        method.as_str(),
        normalized,
        session_id,
        digest
    )
}
