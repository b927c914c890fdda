//! Shared application state.

use std::sync::Arc;

use wwebjs_client::{WhatsAppClient, usecase::ListRoomsUseCase};

/// Shared application state
pub struct AppState {
    pub client: Arc<WhatsAppClient>,
    pub list_rooms: ListRoomsUseCase,
}

impl AppState {
    pub fn new(client: Arc<WhatsAppClient>) -> Self {
        Self {
            list_rooms: ListRoomsUseCase::new(client.clone()),
            client,
        }
    }
}
