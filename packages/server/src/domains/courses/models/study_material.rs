use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::CourseId;

/// Status written once every chapter of the course has been attempted.
pub const STATUS_READY: &str = "Ready";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudyMaterial {
    pub id: i32,
    pub course_id: CourseId,
    pub course_type: String,
    pub topic: String,
    pub difficulty_level: String,
    pub course_layout: Option<serde_json::Value>,
    pub created_by: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Study Material Queries
// =============================================================================

impl StudyMaterial {
    /// Set status to Ready. Returns the number of rows updated.
    pub async fn mark_ready(course_id: &CourseId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("UPDATE study_materials SET status = $2 WHERE course_id = $1")
            .bind(course_id)
            .bind(STATUS_READY)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
