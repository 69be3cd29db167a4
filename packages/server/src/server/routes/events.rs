use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::kernel::DispatchError;
use crate::server::app::AppState;

/// Inbound event envelope
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

/// Dispatch an event to its registered handler and return the completion payload.
///
/// 404 for unknown events, 400 for payloads the handler cannot decode.
pub async fn event_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<EventRequest>,
) -> (StatusCode, Json<Value>) {
    info!(event = %request.name, "Dispatching event");

    // An absent body is an empty event, not a malformed one
    let data = match request.data {
        Value::Null => json!({}),
        data => data,
    };

    match state
        .events
        .dispatch(&request.name, data, state.server_deps.clone())
        .await
    {
        Ok(payload) => (StatusCode::OK, Json(payload)),
        Err(e) => {
            let status = match &e {
                DispatchError::UnknownEvent(_) => StatusCode::NOT_FOUND,
                DispatchError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
                DispatchError::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(event = %request.name, error = %e, "Event dispatch failed");
            (status, Json(json!({ "error": e.to_string() })))
        }
    }
}
