//! One chapter's generate-and-persist sequence.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::common::{ChapterId, CourseId};
use crate::domains::courses::ChapterSpec;
use crate::domains::notes::error::{error_message, NoteTaskError};
use crate::domains::notes::prompts::chapter_notes_prompt;
use crate::domains::notes::types::ChapterOutcome;
use crate::kernel::{BaseNoteStore, BaseTextGenerator, Generation, GenerationOptions, ServerDeps};

/// Generates and stores notes for chapters of one course.
///
/// Cheap to clone; one clone is moved into each spawned chapter task.
#[derive(Clone)]
pub struct ChapterTask {
    course_id: CourseId,
    /// Clock reading taken when the batch started
    id_base: i64,
    generator: Arc<dyn BaseTextGenerator>,
    note_store: Arc<dyn BaseNoteStore>,
    options: Arc<GenerationOptions>,
}

impl ChapterTask {
    pub fn new(course_id: CourseId, deps: &ServerDeps) -> Self {
        Self {
            course_id,
            id_base: deps.clock.now_millis(),
            generator: deps.text_generator.clone(),
            note_store: deps.note_store.clone(),
            options: Arc::new(deps.generation_options.clone()),
        }
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    /// Id of the chapter at `position` in the batch input.
    pub fn chapter_id(&self, position: usize) -> ChapterId {
        ChapterId::derive(self.id_base, position)
    }

    /// Run the chapter. Never fails: every error becomes a `Failed` outcome.
    pub async fn execute(&self, chapter: &ChapterSpec, position: usize) -> ChapterOutcome {
        let chapter_id = self.chapter_id(position);

        match self.generate_and_store(chapter, chapter_id).await {
            Ok(()) => {
                info!(
                    course_id = %self.course_id,
                    chapter_id = %chapter_id,
                    position,
                    "Chapter notes saved"
                );
                ChapterOutcome::success(chapter_id)
            }
            Err(e) => {
                warn!(
                    course_id = %self.course_id,
                    chapter_id = %chapter_id,
                    position,
                    title = chapter.title().unwrap_or_default(),
                    error = %e,
                    "Chapter notes failed"
                );
                ChapterOutcome::failed(chapter_id, e)
            }
        }
    }

    async fn generate_and_store(
        &self,
        chapter: &ChapterSpec,
        chapter_id: ChapterId,
    ) -> Result<(), NoteTaskError> {
        let prompt = chapter_notes_prompt(chapter)?;

        let generation = self
            .generator
            .generate(&prompt, &self.options)
            .await
            .map_err(|e| NoteTaskError::Generation(error_message(&e)))?;

        let notes = match generation {
            Generation::Malformed(reason) => {
                debug!(chapter_id = %chapter_id, reason = %reason, "Unreadable generation");
                return Err(NoteTaskError::NoResponse);
            }
            other => other.into_text().ok_or(NoteTaskError::NoResponse)?,
        };

        self.note_store
            .insert(chapter_id, &self.course_id, &notes)
            .await
            .map_err(|e| NoteTaskError::Persistence(error_message(&e)))
    }
}
