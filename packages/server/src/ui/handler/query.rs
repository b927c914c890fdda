//! Room list request parameters.
//!
//! Filters, pagination and output format arrive as loosely typed query
//! strings (or JSON values in a POST body) and are normalised here.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;
use wwebjs_client::{
    domain::{RoomFilter, RoomSort},
    usecase::{DEFAULT_PER_PAGE, RoomQuery},
};

pub const FORMAT_PARAM: &str = "format";
pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per-page";
pub const SESSION_PARAM: &str = "sessionId";
pub const SORT_PARAM: &str = "sort";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    /// Filtered records only, unsorted and unpaginated
    Raw,
    Html,
}

impl OutputFormat {
    fn parse(value: &str) -> Self {
        match value {
            "raw" => Self::Raw,
            "html" => Self::Html,
            _ => Self::Json,
        }
    }
}

/// Everything a room list request asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomListParams {
    pub query: RoomQuery,
    pub format: OutputFormat,
}

impl RoomListParams {
    /// Read filters, sort, pagination, format and session from query parameters.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let sort = params
            .get(SORT_PARAM)
            .filter(|value| !value.is_empty())
            .and_then(|value| {
                value
                    .parse::<RoomSort>()
                    .inspect_err(|e| debug!("Ignoring sort parameter: {}", e))
                    .ok()
            })
            .unwrap_or_default();

        let query = RoomQuery {
            filter: filter_from_params(|key| params.get(key).cloned()),
            sort,
            page: number_param(params, PAGE_PARAM).unwrap_or(1),
            per_page: number_param(params, PER_PAGE_PARAM).unwrap_or(DEFAULT_PER_PAGE),
            session_id: params
                .get(SESSION_PARAM)
                .filter(|value| !value.is_empty())
                .cloned(),
        };

        Self {
            query,
            format: params
                .get(FORMAT_PARAM)
                .map(|value| OutputFormat::parse(value))
                .unwrap_or_default(),
        }
    }

    /// Drop every filter criterion.
    pub fn without_filters(mut self) -> Self {
        self.query.filter = RoomFilter::default();
        self
    }

    /// Overlay `filter` onto the requested criteria.
    pub fn with_filter(mut self, filter: RoomFilter) -> Self {
        self.query.filter = self.query.filter.merge(filter);
        self
    }
}

/// Filter criteria from a JSON object such as a POST body's `filters`.
pub fn filter_from_json(filters: &Map<String, Value>) -> RoomFilter {
    filter_from_params(|key| filters.get(key).and_then(param_text))
}

fn filter_from_params(get: impl Fn(&str) -> Option<String>) -> RoomFilter {
    let flag = |key: &str| get(key).and_then(|value| parse_flag(key, &value));
    let text = |key: &str| get(key).filter(|value| !value.is_empty());

    RoomFilter {
        is_group: flag("isGroup"),
        has_new_messages: flag("hasNewMessages"),
        room_type: text("type"),
        is_archived: flag("isArchived"),
        is_pinned: flag("isPinned"),
        is_muted: flag("isMuted"),
        name: text("name"),
        min_unread_count: get("minUnreadCount").and_then(|value| parse_integer(&value)),
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            debug!(key, value = other, "Ignoring non-boolean filter value");
            None
        }
    }
}

/// Integral or decimal numbers, truncated toward zero.
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(|number| number.trunc() as i64)
    })
}

fn number_param(params: &HashMap<String, String>, key: &str) -> Option<usize> {
    params.get(key).and_then(|value| value.trim().parse().ok())
}

fn param_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
