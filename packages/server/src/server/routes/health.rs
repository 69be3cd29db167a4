use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::config::NotesConfig;
use crate::server::app::AppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    healthy: bool,
    /// `None` when the database answered the ping
    #[serde(skip_serializing_if = "Option::is_none")]
    database_error: Option<String>,
    notes: NotesSettings,
    events: Vec<&'static str>,
}

/// Batch settings the service is running with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesSettings {
    concurrency_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    task_timeout_secs: Option<u64>,
}

impl From<&NotesConfig> for NotesSettings {
    fn from(config: &NotesConfig) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            task_timeout_secs: config.task_timeout.map(|t| t.as_secs()),
        }
    }
}

/// 200 when the database answers a ping, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthReport>) {
    let ping = sqlx::query("SELECT 1").execute(&state.db_pool);
    let database_error = match tokio::time::timeout(DB_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!("no answer within {}s", DB_PING_TIMEOUT.as_secs())),
    };

    let mut events = state.events.registered_events();
    events.sort_unstable();

    let report = HealthReport {
        healthy: database_error.is_none(),
        database_error,
        notes: NotesSettings::from(&state.server_deps.notes),
        events,
    };
    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}
