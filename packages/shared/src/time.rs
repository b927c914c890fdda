use chrono::{DateTime, Utc};

/// Get current Unix timestamp (seconds)
pub fn now_unix_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Format a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Returns an empty string for timestamps chrono cannot represent.
pub fn format_unix_seconds(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
