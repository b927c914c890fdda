//! HTTP API endpoint handlers.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{error, warn};
use wwebjs_client::{
    ClientError,
    domain::{RoomFilter, RoomSortKey},
    usecase::{DEFAULT_PER_PAGE, ListRoomsError},
};

use super::{
    query::{OutputFormat, RoomListParams, filter_from_json},
    view::render_room_page,
};
use crate::{
    infrastructure::dto::http::{
        ErrorDto, FilterCatalogDto, FilterDescriptorDto, FilterOptionsDto, RoomListDto,
    },
    ui::state::AppState,
};

pub const WHATSAPP_API_ERROR: &str = "whatsapp_api_error";
pub const GENERAL_ERROR: &str = "general_error";

/// Body accepted by `POST /rooms/filter`
#[derive(Debug, Default, Deserialize)]
pub struct FilterBody {
    #[serde(default)]
    pub filters: Map<String, Value>,
}

type Params = Query<HashMap<String, String>>;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Rooms matching the filters in the query string
pub async fn list_rooms(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    respond(&state, RoomListParams::from_query(&params)).await
}

/// Every room; filter parameters are ignored
pub async fn list_all_rooms(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    respond(&state, RoomListParams::from_query(&params).without_filters()).await
}

pub async fn list_groups(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    let preset = RoomFilter {
        is_group: Some(true),
        ..Default::default()
    };
    respond(&state, RoomListParams::from_query(&params).with_filter(preset)).await
}

pub async fn list_individual(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Response {
    let preset = RoomFilter {
        is_group: Some(false),
        ..Default::default()
    };
    respond(&state, RoomListParams::from_query(&params).with_filter(preset)).await
}

pub async fn list_unread(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    let preset = RoomFilter {
        has_new_messages: Some(true),
        ..Default::default()
    };
    respond(&state, RoomListParams::from_query(&params).with_filter(preset)).await
}

pub async fn list_archived(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    let preset = RoomFilter {
        is_archived: Some(true),
        ..Default::default()
    };
    respond(&state, RoomListParams::from_query(&params).with_filter(preset)).await
}

pub async fn list_pinned(State(state): State<Arc<AppState>>, Query(params): Params) -> Response {
    let preset = RoomFilter {
        is_pinned: Some(true),
        ..Default::default()
    };
    respond(&state, RoomListParams::from_query(&params).with_filter(preset)).await
}

/// `POST /rooms/filter`: body filters override the query string.
///
/// A body that is not sent as JSON carries no filters; malformed JSON is
/// answered with a `general_error`.
pub async fn filter_rooms(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
    body: Result<Json<FilterBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => FilterBody::default(),
        Err(rejection) => {
            warn!("Rejected filter body: {}", rejection.body_text());
            let dto = ErrorDto::new(rejection.body_text(), GENERAL_ERROR);
            return (StatusCode::BAD_REQUEST, Json(dto)).into_response();
        }
    };
    let filter = filter_from_json(&body.filters);
    respond(&state, RoomListParams::from_query(&params).with_filter(filter)).await
}

/// Catalogue of filters, sort fields and pagination parameters
pub async fn filter_options() -> Json<FilterOptionsDto> {
    let descriptor = |value_type, description, example: Value| FilterDescriptorDto {
        value_type,
        description,
        options: None,
        example,
    };
    let filters = [
        (
            "isGroup",
            descriptor(
                "boolean",
                "Filter by group chats (true) or individual chats (false)",
                json!(true),
            ),
        ),
        (
            "hasNewMessages",
            descriptor("boolean", "Filter by chats with unread messages", json!(true)),
        ),
        (
            "type",
            FilterDescriptorDto {
                options: Some(vec!["individual", "group"]),
                ..descriptor("string", "Chat type", json!("group"))
            },
        ),
        (
            "isArchived",
            descriptor("boolean", "Filter by archived status", json!(false)),
        ),
        (
            "isPinned",
            descriptor("boolean", "Filter by pinned status", json!(true)),
        ),
        (
            "isMuted",
            descriptor("boolean", "Filter by muted status", json!(false)),
        ),
        (
            "name",
            descriptor(
                "string",
                "Filter by chat name (partial match, case-insensitive)",
                json!("Family"),
            ),
        ),
        (
            "minUnreadCount",
            descriptor("integer", "Minimum unread message count", json!(5)),
        ),
    ];

    let to_map = |pairs: Vec<(String, Value)>| pairs.into_iter().collect::<Map<String, Value>>();
    let catalog = FilterCatalogDto {
        available_filters: to_map(
            filters
                .into_iter()
                .map(|(key, d)| (key.to_string(), json!(d)))
                .collect(),
        ),
        supported_sort_fields: to_map(
            RoomSortKey::ALL
                .iter()
                .map(|key| (key.as_str().to_string(), json!(key.label())))
                .collect(),
        ),
        pagination_options: to_map(vec![
            (
                "per-page".to_string(),
                json!(format!("Number of items per page (default: {DEFAULT_PER_PAGE})")),
            ),
            ("page".to_string(), json!("Page number (1-based)")),
            (
                "sort".to_string(),
                json!("Sort field, prefixed with '-' for descending order (default: -timestamp)"),
            ),
        ]),
        examples: to_map(
            [
                ("Get all groups with unread messages", "?isGroup=1&hasNewMessages=1"),
                ("Get individual chats only", "?isGroup=0"),
                ("Search for chats by name", "?name=family"),
                ("Get chats with 5+ unread messages", "?minUnreadCount=5"),
                ("Get archived groups", "?isGroup=1&isArchived=1"),
            ]
            .into_iter()
            .map(|(label, query)| (label.to_string(), json!(query)))
            .collect(),
        ),
    };

    Json(FilterOptionsDto {
        success: true,
        data: catalog,
    })
}

async fn respond(state: &AppState, params: RoomListParams) -> Response {
    let RoomListParams { query, format } = params;
    let session_id = state
        .client
        .resolve_session(query.session_id.as_deref())
        .to_string();

    let result = match format {
        OutputFormat::Raw => state
            .list_rooms
            .fetch_rooms(&query.filter, query.session_id.as_deref())
            .await
            .map(|rooms| Json(rooms).into_response()),
        OutputFormat::Json => state.list_rooms.execute(&query).await.map(|page| {
            Json(RoomListDto::new(page, query.filter.clone(), session_id.clone())).into_response()
        }),
        OutputFormat::Html => state
            .list_rooms
            .execute(&query)
            .await
            .map(|page| Html(render_room_page(&page, &query.filter, &session_id)).into_response()),
    };

    result.unwrap_or_else(error_response)
}

fn error_response(e: ListRoomsError) -> Response {
    let (status, body) = match &e {
        ListRoomsError::ChatsUnavailable(_) | ListRoomsError::Client(ClientError::RequestFailed(_)) => {
            error!("WhatsApp API error while listing rooms: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                ErrorDto::new(e.to_string(), WHATSAPP_API_ERROR),
            )
        }
        ListRoomsError::Client(_) => {
            error!("General error while listing rooms: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDto::new("An unexpected error occurred", GENERAL_ERROR),
            )
        }
    };
    (status, Json(body)).into_response()
}
