//! Router construction and the serve loop.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use wwebjs_client::{ClientConfig, WhatsAppClient};

use super::{
    handler::http::{
        filter_options, filter_rooms, health_check, list_all_rooms, list_archived,
        list_groups, list_individual, list_pinned, list_rooms, list_unread,
    },
    signal::shutdown_signal,
    state::AppState,
};
use crate::error::ServerError;

/// Listen address and the wwebjs client settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub client: ClientConfig,
}

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/rooms", get(list_rooms))
        .route("/rooms/list", get(list_all_rooms))
        .route("/rooms/groups", get(list_groups))
        .route("/rooms/individual", get(list_individual))
        .route("/rooms/unread", get(list_unread))
        .route("/rooms/archived", get(list_archived))
        .route("/rooms/pinned", get(list_pinned))
        .route("/rooms/filter", get(list_rooms).post(filter_rooms))
        .route("/rooms/filter-options", get(filter_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let client = Arc::new(WhatsAppClient::from_config(config.client)?);
    info!(
        base_url = client.base_url(),
        session = client.default_session_id(),
        cache = client.cache_enabled(),
        "WhatsApp client ready"
    );
    let app = create_router(Arc::new(AppState::new(client)));

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
