//! Stateless checks and normalizers for identifiers and message payloads.
//!
//! Everything here is pure. The endpoint surface calls these before building a
//! request so bad input never reaches the network.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;
use url::Url;

/// Domain suffix of an individual chat ID.
pub const INDIVIDUAL_SUFFIX: &str = "@c.us";
/// Domain suffix of a group chat ID.
pub const GROUP_SUFFIX: &str = "@g.us";
/// Domain suffix used by multi-device accounts.
pub const USER_SUFFIX: &str = "@s.whatsapp.net";

/// E.164 bounds on the digit count of a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// WhatsApp accepts at most this many poll options.
pub const MAX_POLL_OPTIONS: usize = 12;

/// Default limit for [`sanitize_message_text`].
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 4096;

const ELLIPSIS: &str = "...";

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 7 to 15 digits once every non-digit character is removed.
pub fn is_valid_whatsapp_number(number: &str) -> bool {
    let count = number.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&count)
}

/// Turn a phone number into a chat ID.
///
/// Values that already carry an `@` domain are returned unchanged. Anything
/// else is stripped to its digits and given `suffix`.
pub fn format_to_whatsapp_id(number: &str, suffix: &str) -> String {
    if number.contains('@') {
        return number.to_string();
    }
    let mut id = digits(number);
    id.push_str(suffix);
    id
}

/// [`format_to_whatsapp_id`] with the individual chat suffix.
pub fn format_to_individual_id(number: &str) -> String {
    format_to_whatsapp_id(number, INDIVIDUAL_SUFFIX)
}

/// Strip every known domain suffix from a chat ID.
pub fn extract_number_from_id(whatsapp_id: &str) -> String {
    [INDIVIDUAL_SUFFIX, GROUP_SUFFIX, USER_SUFFIX]
        .iter()
        .fold(whatsapp_id.to_string(), |id, suffix| id.replace(suffix, ""))
}

pub fn is_group_chat(chat_id: &str) -> bool {
    chat_id.contains(GROUP_SUFFIX)
}

pub fn is_individual_chat(chat_id: &str) -> bool {
    chat_id.contains(INDIVIDUAL_SUFFIX)
}

/// Absolute URL with a scheme and a host.
pub fn is_valid_url(url: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }
    Url::parse(url).is_ok_and(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty()))
}

/// Latitude in [-90, 90] and longitude in [-180, 180]. NaN is rejected.
pub fn is_valid_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Object with non-empty `mimetype` and `data`, where `data` is valid base64.
pub fn is_valid_media_data(media: &Value) -> bool {
    let Some(map) = media.as_object() else {
        return false;
    };
    let non_empty = |field: &str| {
        map.get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    };
    match (non_empty("mimetype"), non_empty("data")) {
        (Some(_), Some(data)) => STANDARD.decode(data).is_ok_and(|bytes| !bytes.is_empty()),
        _ => false,
    }
}

/// Between 1 and [`MAX_POLL_OPTIONS`] options, none of them blank.
pub fn is_valid_poll_options<S: AsRef<str>>(options: &[S]) -> bool {
    !options.is_empty()
        && options.len() <= MAX_POLL_OPTIONS
        && options.iter().all(|option| !option.as_ref().trim().is_empty())
}

/// Non-empty, only ASCII alphanumerics, `-` and `_`.
pub fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Remove control characters (0x00-0x1F, 0x7F), trim, and cap the length.
///
/// Text longer than `max_length` characters is cut to `max_length - 3`
/// characters followed by `...`. Limits too short for the ellipsis cut the
/// text without one.
pub fn sanitize_message_text(text: &str, max_length: usize) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(*c, '\u{00}'..='\u{1F}' | '\u{7F}'))
        .collect();
    let trimmed = cleaned.trim();

    if trimmed.chars().count() <= max_length {
        return trimmed.to_string();
    }
    if max_length <= ELLIPSIS.len() {
        return trimmed.chars().take(max_length).collect();
    }
    let mut truncated: String = trimmed
        .chars()
        .take(max_length.saturating_sub(ELLIPSIS.len()))
        .collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
