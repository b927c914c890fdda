//! HTML rendering of a room page.

use std::fmt::Write;

use wwebjs_client::{
    domain::{Room, RoomFilter},
    usecase::RoomPage,
};

const TITLE: &str = "WhatsApp Rooms";
const PREVIEW_LENGTH: usize = 50;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Full HTML document with the filter form, quick links, the room table and statistics.
pub fn render_room_page(page: &RoomPage, filter: &RoomFilter, session_id: &str) -> String {
    let session = escape_html(session_id);
    let mut html = String::new();

    // `write!` into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{TITLE}</title>\n\
         <style>.badge {{ margin-right: 5px; }} table {{ border-collapse: collapse; }} \
         td, th {{ border: 1px solid #ccc; padding: 4px 8px; }}</style>\n</head>\n<body>\n\
         <div class=\"whatsapp-rooms-index\">\n<h1>{TITLE}</h1>\n"
    );
    render_filter_form(&mut html, filter);
    html.push_str(
        "<div class=\"btn-group\">\n\
         <a href=\"/rooms/list?format=html\">All Rooms</a>\n\
         <a href=\"/rooms/groups?format=html\">Groups</a>\n\
         <a href=\"/rooms/individual?format=html\">Individual</a>\n\
         <a href=\"/rooms/unread?format=html\">Unread</a>\n\
         <a href=\"/rooms/archived?format=html\">Archived</a>\n\
         <a href=\"/rooms/pinned?format=html\">Pinned</a>\n</div>\n",
    );

    if page.items.is_empty() {
        html.push_str("<p class=\"empty\">No rooms found with the current filters.</p>\n");
    } else {
        let begin = (page.current_page - 1) * page.per_page + 1;
        let end = begin + page.items.len() - 1;
        let _ = writeln!(
            html,
            "<p class=\"summary\">Showing {begin}-{end} of {} rooms. Session: {session}</p>",
            page.total_count
        );
        html.push_str(
            "<table class=\"table\">\n<thead><tr><th>Chat Name</th><th>Type</th><th>Unread</th>\
             <th>Last Message</th><th>Last Activity</th><th>Status</th></tr></thead>\n<tbody>\n",
        );
        for room in &page.items {
            render_row(&mut html, room);
        }
        html.push_str("</tbody>\n</table>\n");
    }

    let _ = write!(
        html,
        "<div class=\"statistics\">\n<strong>Total Rooms:</strong> {}\n\
         <strong>Current Filters:</strong> {}\n\
         <strong>Page:</strong> {} of {}\n\
         <strong>Session:</strong> {session}\n</div>\n</div>\n</body>\n</html>\n",
        page.total_count,
        active_filters(filter),
        page.current_page,
        page.page_count,
    );
    html
}

fn select(name: &str, current: Option<&str>, options: &[(&str, &str)]) -> String {
    let mut out = format!("<select name=\"{name}\">");
    for (value, label) in options {
        let selected = if current.unwrap_or_default() == *value {
            " selected"
        } else {
            ""
        };
        let _ = write!(out, "<option value=\"{value}\"{selected}>{label}</option>");
    }
    out.push_str("</select>\n");
    out
}

fn flag_value(value: Option<bool>) -> Option<&'static str> {
    value.map(|v| if v { "1" } else { "0" })
}

fn render_filter_form(html: &mut String, filter: &RoomFilter) {
    html.push_str("<form method=\"get\" class=\"form-inline\">\n<input type=\"hidden\" name=\"format\" value=\"html\">\n");
    html.push_str(&select(
        "type",
        filter.room_type.as_deref(),
        &[("", "All Types"), ("individual", "Individual Chats"), ("group", "Group Chats")],
    ));
    html.push_str(&select(
        "isGroup",
        flag_value(filter.is_group),
        &[("", "All"), ("1", "Groups Only"), ("0", "Individual Only")],
    ));
    html.push_str(&select(
        "hasNewMessages",
        flag_value(filter.has_new_messages),
        &[("", "All"), ("1", "With New Messages"), ("0", "No New Messages")],
    ));
    let _ = writeln!(
        html,
        "<input type=\"text\" name=\"name\" value=\"{}\" placeholder=\"Search by name...\">",
        escape_html(filter.name.as_deref().unwrap_or_default())
    );
    html.push_str(
        "<button type=\"submit\">Filter</button>\n<a href=\"/rooms?format=html\">Clear</a>\n</form>\n",
    );
}

fn render_row(html: &mut String, room: &Room) {
    let unread = if room.unread_count > 0 {
        format!("<td class=\"text-danger\">{}</td>", room.unread_count)
    } else {
        "<td>-</td>".to_string()
    };
    let last_message = match room.last_message.as_ref().and_then(|m| m.body.as_deref()) {
        Some(_) => escape_html(&room.last_message_body(PREVIEW_LENGTH)),
        None => "<em class=\"text-muted\">No messages</em>".to_string(),
    };

    let mut badges = Vec::new();
    if room.is_pinned {
        badges.push("<span class=\"badge badge-success\">Pinned</span>");
    }
    if room.is_archived {
        badges.push("<span class=\"badge badge-secondary\">Archived</span>");
    }
    if room.is_muted {
        badges.push("<span class=\"badge badge-warning\">Muted</span>");
    }
    if room.has_new_messages {
        badges.push("<span class=\"badge badge-danger\">New Messages</span>");
    }

    let _ = writeln!(
        html,
        "<tr><td>{}</td><td>{}</td>{unread}<td>{last_message}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&room.name),
        capitalize(room.room_type.as_str()),
        room.formatted_time(),
        badges.join(" "),
    );
}

fn active_filters(filter: &RoomFilter) -> usize {
    [
        filter.is_group.is_some(),
        filter.has_new_messages.is_some(),
        filter.room_type.is_some(),
        filter.is_archived.is_some(),
        filter.is_pinned.is_some(),
        filter.is_muted.is_some(),
        filter.name.is_some(),
        filter.min_unread_count.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wwebjs_client::usecase::paginate;

    fn page(records: Vec<serde_json::Value>) -> RoomPage {
        let rooms = records
            .iter()
            .map(|record| Room::from_record_at(record, 1_700_000_000))
            .collect();
        paginate(rooms, 1, 20)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_rows_and_badges() {
        // テスト項目: ルーム名はエスケープされ、状態バッジと件数が表示される
        // given (前提条件):
        let page = page(vec![json!({
            "id": "g1@g.us",
            "name": "<Team>",
            "isGroup": true,
            "unreadCount": 4,
            "pinned": true,
            "lastMessage": {"body": "see you", "timestamp": 1_700_000_000}
        })]);
        let filter = RoomFilter {
            is_group: Some(true),
            ..Default::default()
        };

        // when (操作):
        let html = render_room_page(&page, &filter, "work");

        // then (期待する結果):
        assert!(html.contains("<td>&lt;Team&gt;</td><td>Group</td><td class=\"text-danger\">4</td>"));
        assert!(html.contains("<td>see you</td><td>2023-11-14 22:13:20</td>"));
        assert!(html.contains("Pinned</span> <span class=\"badge badge-danger\">New Messages"));
        assert!(html.contains("Showing 1-1 of 1 rooms. Session: work"));
        assert!(html.contains("<strong>Current Filters:</strong> 1"));
        assert!(html.contains("<option value=\"1\" selected>Groups Only</option>"));
    }

    #[test]
    fn test_render_empty_page() {
        let html = render_room_page(&page(vec![]), &RoomFilter::default(), "default");

        assert!(html.contains("No rooms found with the current filters."));
        assert!(!html.contains("<table"));
        assert!(html.contains("<strong>Page:</strong> 1 of 0"));
    }

    #[test]
    fn test_room_without_messages() {
        let html = render_room_page(
            &page(vec![json!({"id": "1@c.us", "name": "Alice"})]),
            &RoomFilter::default(),
            "default",
        );

        assert!(html.contains("<td>Alice</td><td>Individual</td><td>-</td><td><em class=\"text-muted\">No messages</em></td>"));
    }
}
