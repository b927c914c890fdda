//! Room: normalized, filterable view of one chat record returned by the API.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wwebjs_shared::time::{format_unix_seconds, now_unix_seconds};

/// Raw chat keys mapped onto Room fields; everything else lands in `metadata`.
const KNOWN_KEYS: [&str; 8] = [
    "id",
    "name",
    "isGroup",
    "unreadCount",
    "lastMessage",
    "archived",
    "pinned",
    "isMuted",
];

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Individual,
    Group,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last message preview of a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Remaining message fields, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LastMessage {
    /// Read `body` and `timestamp` leniently; a fractional timestamp is
    /// truncated and every other field is kept in `extra`.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let mut extra = record.clone();
        let body = extra.remove("body").and_then(|value| match value {
            Value::String(body) => Some(body),
            _ => None,
        });
        let timestamp = extra.remove("timestamp").as_ref().and_then(unix_seconds);
        Self {
            body,
            timestamp,
            extra,
        }
    }
}

fn unix_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub is_group: bool,
    pub unread_count: u64,
    pub has_new_messages: bool,
    pub last_message: Option<LastMessage>,
    /// Unix seconds of the last activity
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub is_archived: bool,
    pub is_pinned: bool,
    pub is_muted: bool,
    pub metadata: Map<String, Value>,
}

impl Room {
    /// Map one raw chat record, using the current time when there is no last message.
    pub fn from_record(raw: &Value) -> Self {
        Self::from_record_at(raw, now_unix_seconds())
    }

    /// [`from_record`](Self::from_record) with an explicit "now".
    pub fn from_record_at(raw: &Value, now: i64) -> Self {
        let empty = Map::new();
        let record = raw.as_object().unwrap_or(&empty);
        let flag = |key: &str| record.get(key).and_then(Value::as_bool).unwrap_or(false);

        let id = match record.get("id") {
            Some(Value::Object(id)) => id
                .get("_serialized")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Some(Value::String(id)) => id.clone(),
            _ => String::new(),
        };
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_NAME)
            .to_string();
        let is_group = flag("isGroup");
        let unread_count = record
            .get("unreadCount")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let last_message = record
            .get("lastMessage")
            .and_then(Value::as_object)
            .map(LastMessage::from_record);
        let timestamp = last_message
            .as_ref()
            .and_then(|message| message.timestamp)
            .unwrap_or(now);
        let metadata = record
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            id,
            name,
            is_group,
            unread_count,
            has_new_messages: unread_count > 0,
            last_message,
            timestamp,
            room_type: if is_group {
                RoomType::Group
            } else {
                RoomType::Individual
            },
            is_archived: flag("archived"),
            is_pinned: flag("pinned"),
            is_muted: flag("isMuted"),
            metadata,
        }
    }

    /// Every present criterion holds.
    pub fn matches(&self, filter: &RoomFilter) -> bool {
        let flag_ok = |wanted: Option<bool>, actual: bool| wanted.is_none_or(|w| w == actual);

        flag_ok(filter.is_group, self.is_group)
            && flag_ok(filter.has_new_messages, self.has_new_messages)
            && flag_ok(filter.is_archived, self.is_archived)
            && flag_ok(filter.is_pinned, self.is_pinned)
            && flag_ok(filter.is_muted, self.is_muted)
            && filter
                .room_type
                .as_deref()
                .is_none_or(|wanted| wanted == self.room_type.as_str())
            && filter.name.as_deref().is_none_or(|needle| {
                needle.is_empty() || self.name.to_lowercase().contains(&needle.to_lowercase())
            })
            && filter
                .min_unread_count
                .is_none_or(|min| i64::try_from(self.unread_count).unwrap_or(i64::MAX) >= min)
    }

    /// Last activity as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub fn formatted_time(&self) -> String {
        format_unix_seconds(self.timestamp)
    }

    /// Last message body cut to `length` characters, or "No messages".
    pub fn last_message_body(&self, length: usize) -> String {
        let Some(body) = self.last_message.as_ref().and_then(|m| m.body.as_deref()) else {
            return "No messages".to_string();
        };
        if body.chars().count() > length {
            let mut preview: String = body.chars().take(length).collect();
            preview.push_str("...");
            preview
        } else {
            body.to_string()
        }
    }
}

/// Filter criteria over rooms; `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_new_messages: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,
    /// Case-insensitive substring of the room name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_unread_count: Option<i64>,
}

impl RoomFilter {
    /// Names accepted as filter keys, in wire form.
    pub const KEYS: [&'static str; 8] = [
        "isGroup",
        "hasNewMessages",
        "type",
        "isArchived",
        "isPinned",
        "isMuted",
        "name",
        "minUnreadCount",
    ];

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay every criterion set in `other` onto `self`.
    pub fn merge(mut self, other: RoomFilter) -> Self {
        self.is_group = other.is_group.or(self.is_group);
        self.has_new_messages = other.has_new_messages.or(self.has_new_messages);
        self.room_type = other.room_type.or(self.room_type);
        self.is_archived = other.is_archived.or(self.is_archived);
        self.is_pinned = other.is_pinned.or(self.is_pinned);
        self.is_muted = other.is_muted.or(self.is_muted);
        self.name = other.name.or(self.name);
        self.min_unread_count = other.min_unread_count.or(self.min_unread_count);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomSortKey {
    Name,
    Timestamp,
    UnreadCount,
    Type,
    IsGroup,
    HasNewMessages,
    IsArchived,
    IsPinned,
    IsMuted,
}

impl RoomSortKey {
    pub const ALL: [RoomSortKey; 9] = [
        Self::Name,
        Self::Timestamp,
        Self::UnreadCount,
        Self::Type,
        Self::IsGroup,
        Self::HasNewMessages,
        Self::IsArchived,
        Self::IsPinned,
        Self::IsMuted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Timestamp => "timestamp",
            Self::UnreadCount => "unreadCount",
            Self::Type => "type",
            Self::IsGroup => "isGroup",
            Self::HasNewMessages => "hasNewMessages",
            Self::IsArchived => "isArchived",
            Self::IsPinned => "isPinned",
            Self::IsMuted => "isMuted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Chat name",
            Self::Timestamp => "Last message time",
            Self::UnreadCount => "Unread message count",
            Self::Type => "Chat type",
            Self::IsGroup => "Group status",
            Self::HasNewMessages => "Has new messages",
            Self::IsArchived => "Archived status",
            Self::IsPinned => "Pinned status",
            Self::IsMuted => "Muted status",
        }
    }

    fn compare(&self, a: &Room, b: &Room) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Timestamp => a.timestamp.cmp(&b.timestamp),
            Self::UnreadCount => a.unread_count.cmp(&b.unread_count),
            Self::Type => a.room_type.as_str().cmp(b.room_type.as_str()),
            Self::IsGroup => a.is_group.cmp(&b.is_group),
            Self::HasNewMessages => a.has_new_messages.cmp(&b.has_new_messages),
            Self::IsArchived => a.is_archived.cmp(&b.is_archived),
            Self::IsPinned => a.is_pinned.cmp(&b.is_pinned),
            Self::IsMuted => a.is_muted.cmp(&b.is_muted),
        }
    }
}

impl FromStr for RoomSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort field: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Sort key and direction; defaults to most recent activity first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSort {
    pub key: RoomSortKey,
    pub order: SortOrder,
}

impl Default for RoomSort {
    fn default() -> Self {
        Self {
            key: RoomSortKey::Timestamp,
            order: SortOrder::Desc,
        }
    }
}

impl RoomSort {
    /// Stable sort of `rooms` in place.
    pub fn apply(&self, rooms: &mut [Room]) {
        rooms.sort_by(|a, b| {
            let ordering = self.key.compare(a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

impl FromStr for RoomSort {
    type Err = String;

    /// `key` sorts ascending, `-key` descending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (order, key) = match s.strip_prefix('-') {
            Some(key) => (SortOrder::Desc, key),
            None => (SortOrder::Asc, s),
        };
        Ok(Self {
            key: key.parse()?,
            order,
        })
    }
}
