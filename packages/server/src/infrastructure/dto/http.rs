//! HTTP API response DTOs for the room service.

use serde::Serialize;
use serde_json::{Map, Value};
use wwebjs_client::{
    domain::{Room, RoomFilter},
    usecase::RoomPage,
};

/// Body of a successful `format=json` room listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListDto {
    pub success: bool,
    pub data: Vec<Room>,
    pub pagination: PaginationDto,
    pub filters: RoomFilter,
    pub session_id: String,
}

impl RoomListDto {
    pub fn new(page: RoomPage, filters: RoomFilter, session_id: String) -> Self {
        Self {
            success: true,
            pagination: PaginationDto {
                total_count: page.total_count,
                page_count: page.page_count,
                current_page: page.current_page,
                per_page: page.per_page,
            },
            data: page.items,
            filters,
            session_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total_count: usize,
    pub page_count: usize,
    /// 1-based
    pub current_page: usize,
    pub per_page: usize,
}

/// Body of every failed request
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>, code: &'static str) -> Self {
        Self {
            success: false,
            error: error.into(),
            code,
        }
    }
}

/// One entry of `availableFilters`
#[derive(Debug, Clone, Serialize)]
pub struct FilterDescriptorDto {
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
    pub example: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCatalogDto {
    pub available_filters: Map<String, Value>,
    pub supported_sort_fields: Map<String, Value>,
    pub pagination_options: Map<String, Value>,
    pub examples: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOptionsDto {
    pub success: bool,
    pub data: FilterCatalogDto,
}
