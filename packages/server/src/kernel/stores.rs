// Postgres implementations of the persistence traits.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use super::{BaseCourseStatusStore, BaseNoteStore};
use crate::common::{ChapterId, CourseId};
use crate::domains::courses::StudyMaterial;
use crate::domains::notes::ChapterNote;

/// Notes stored in `chapter_notes`
#[derive(Clone)]
pub struct PostgresNoteStore {
    pool: PgPool,
}

impl PostgresNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseNoteStore for PostgresNoteStore {
    async fn insert(&self, chapter_id: ChapterId, course_id: &CourseId, notes: &str) -> Result<()> {
        ChapterNote::create(chapter_id, course_id, notes, &self.pool).await?;
        Ok(())
    }
}

/// Course status kept on `study_materials`
#[derive(Clone)]
pub struct PostgresCourseStatusStore {
    pool: PgPool,
}

impl PostgresCourseStatusStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCourseStatusStore for PostgresCourseStatusStore {
    async fn set_ready(&self, course_id: &CourseId) -> Result<()> {
        let updated = StudyMaterial::mark_ready(course_id, &self.pool).await?;
        if updated == 0 {
            warn!(course_id = %course_id, "No study material row to mark ready");
        }
        Ok(())
    }
}
