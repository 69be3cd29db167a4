use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ChapterId, CourseId};

/// Generated notes for one chapter.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChapterNote {
    pub id: i32,
    pub chapter_id: ChapterId,
    pub course_id: CourseId,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Chapter Note Queries
// =============================================================================

impl ChapterNote {
    pub async fn create(
        chapter_id: ChapterId,
        course_id: &CourseId,
        notes: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO chapter_notes (chapter_id, course_id, notes)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(chapter_id)
        .bind(course_id)
        .bind(notes)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
