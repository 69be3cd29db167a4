//! Notes workflow: validate → run the chapter batch → reconcile course status.

use tracing::info;

use super::batch_runner::BoundedBatchRunner;
use super::chapter_task::ChapterTask;
use super::reconcile::reconcile_course_status;
use crate::domains::courses::{CourseGenerationRequest, GenerateNotesEvent};
use crate::domains::notes::types::{BatchResult, GenerateNotesResult};
use crate::kernel::ServerDeps;

/// Handle a `notes.generate` event.
///
/// Never fails: missing input is reported as `Skipped` without touching the
/// generator or any store, and every other failure lands in the result.
pub async fn generate_course_notes(event: &GenerateNotesEvent, deps: &ServerDeps) -> GenerateNotesResult {
    match event.validate() {
        Ok(request) => GenerateNotesResult::Completed(run_notes_batch(request, deps).await),
        Err(reason) => {
            info!(reason = %reason, "Skipping chapter notes generation");
            GenerateNotesResult::Skipped { reason }
        }
    }
}

/// Generate notes for every chapter, then mark the course ready.
pub async fn run_notes_batch(request: CourseGenerationRequest, deps: &ServerDeps) -> BatchResult {
    let CourseGenerationRequest {
        chapters,
        course_id,
    } = request;

    info!(
        course_id = %course_id,
        chapters = chapters.len(),
        concurrency = deps.notes.concurrency_limit,
        "Generating chapter notes"
    );

    let task = ChapterTask::new(course_id.clone(), deps);
    let outcomes = BoundedBatchRunner::from_config(&deps.notes)
        .run(&task, chapters)
        .await;

    let status_update =
        reconcile_course_status(Some(&course_id), &outcomes, deps.course_status.as_ref()).await;

    let result = BatchResult {
        outcomes,
        status_update,
    };

    info!(
        course_id = %course_id,
        succeeded = result.succeeded(),
        failed = result.failed(),
        status_update = %result.status_update,
        "Chapter notes generation complete"
    );

    result
}
