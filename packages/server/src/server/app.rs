//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::domains::notes::register_notes_events;
use crate::kernel::{EventRegistry, ServerDeps};
use crate::server::routes::{event_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub events: Arc<EventRegistry>,
}

/// Registry with every domain's event handlers
pub fn build_event_registry() -> EventRegistry {
    let mut registry = EventRegistry::new();
    register_notes_events(&mut registry);
    registry
}

/// Build the Axum application router
pub fn build_app(db_pool: PgPool, server_deps: ServerDeps) -> Router {
    let app_state = AppState {
        db_pool,
        server_deps: Arc::new(server_deps),
        events: Arc::new(build_event_registry()),
    };

    Router::new()
        // Inbound triggers (e.g. notes.generate from the outline step)
        .route("/api/events", post(event_handler))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
}
