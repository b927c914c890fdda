//! Response envelope returned by every API operation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Error message used when an unsuccessful body carries neither `error` nor `message`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Normalized success/status/data wrapper around one HTTP exchange.
///
/// Built once per completed exchange and never mutated afterwards, so the same
/// value can be handed out again from the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub status_code: u16,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(success: bool, status_code: u16, data: Value) -> Self {
        Self {
            success,
            status_code,
            data,
        }
    }

    /// Build an envelope from a received status and parsed body.
    ///
    /// The success flag follows the status class.
    pub fn from_status(status_code: u16, data: Value) -> Self {
        Self::new((200..300).contains(&status_code), status_code, data)
    }

    /// `success` is set and the status is 2xx.
    pub fn is_successful(&self) -> bool {
        self.success && (200..300).contains(&self.status_code)
    }

    /// The `result` field of a successful body, or the whole body when there is none.
    pub fn result(&self) -> Option<&Value> {
        if !self.is_successful() {
            return None;
        }
        Some(self.field("result").unwrap_or(&self.data))
    }

    /// Consuming variant of [`result`](Self::result).
    pub fn into_result(self) -> Option<Value> {
        if !self.is_successful() {
            return None;
        }
        match self.data {
            Value::Object(mut map) if map.get("result").is_some_and(|v| !v.is_null()) => {
                map.remove("result")
            }
            other => Some(other),
        }
    }

    /// `error`, then `message`, then a generic fallback. `None` when successful.
    pub fn error_message(&self) -> Option<String> {
        if self.is_successful() {
            return None;
        }
        let message = self
            .field("error")
            .or_else(|| self.field("message"))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        Some(message)
    }

    /// Field of the body, `None` when the body is not an object, lacks the field
    /// or holds `null` there.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.field(field)
    }

    /// [`get`](Self::get) with a fallback value.
    pub fn get_or<'a>(&'a self, field: &str, default: &'a Value) -> &'a Value {
        self.field(field).unwrap_or(default)
    }

    /// String field of the body, for display purposes.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.field(field).and_then(Value::as_str)
    }

    /// List payload of a successful response: the unwrapped result when it is
    /// an array, else the array under `key`, else empty.
    pub fn list(&self, key: &str) -> &[Value] {
        match self.result() {
            Some(Value::Array(items)) => items,
            Some(_) => self
                .field(key)
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => &[],
        }
    }

    /// `{success, statusCode, data}` representation.
    pub fn to_value(&self) -> Value {
        json!({
            "success": self.success,
            "statusCode": self.status_code,
            "data": self.data,
        })
    }

    fn field(&self, field: &str) -> Option<&Value> {
        self.data
            .as_object()
            .and_then(|map| map.get(field))
            .filter(|value| !value.is_null())
    }
}
