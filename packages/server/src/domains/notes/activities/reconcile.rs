use tracing::{info, warn};

use crate::common::CourseId;
use crate::domains::notes::error::error_message;
use crate::domains::notes::types::{ChapterOutcome, StatusUpdate};
use crate::kernel::BaseCourseStatusStore;

/// Mark the course Ready once the batch has settled.
///
/// Runs whatever the chapter outcomes were. A single write, no retry.
pub async fn reconcile_course_status(
    course_id: Option<&CourseId>,
    outcomes: &[ChapterOutcome],
    store: &dyn BaseCourseStatusStore,
) -> StatusUpdate {
    let Some(course_id) = course_id else {
        info!("No course id, skipping status update");
        return StatusUpdate::Skipped;
    };

    match store.set_ready(course_id).await {
        Ok(()) => {
            info!(
                course_id = %course_id,
                chapters = outcomes.len(),
                failed = outcomes.iter().filter(|o| !o.is_success()).count(),
                "Course marked ready"
            );
            StatusUpdate::Success
        }
        Err(e) => {
            let message = error_message(&e);
            warn!(course_id = %course_id, error = %message, "Failed to update course status");
            StatusUpdate::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ChapterId;
    use crate::kernel::test_dependencies::MockCourseStatusStore;

    #[tokio::test]
    async fn missing_course_id_is_skipped_without_write() {
        let store = MockCourseStatusStore::new();
        let update = reconcile_course_status(None, &[], &store).await;
        assert_eq!(update, StatusUpdate::Skipped);
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn runs_even_when_every_chapter_failed() {
        let store = MockCourseStatusStore::new();
        let course_id = CourseId::parse("course-9").unwrap();
        let outcomes = vec![
            ChapterOutcome::failed(ChapterId::from_i64(1), "No AI response"),
            ChapterOutcome::failed(ChapterId::from_i64(2), "No AI response"),
        ];

        let update = reconcile_course_status(Some(&course_id), &outcomes, &store).await;

        assert_eq!(update, StatusUpdate::Success);
        assert_eq!(store.calls(), vec![course_id]);
    }

    #[tokio::test]
    async fn store_error_message_is_reported() {
        let store = MockCourseStatusStore::failing("DbTimeout");
        let course_id = CourseId::parse("course-9").unwrap();

        let update = reconcile_course_status(Some(&course_id), &[], &store).await;

        assert_eq!(update, StatusUpdate::Failed("DbTimeout".to_string()));
        assert_eq!(store.call_count(), 1);
    }
}
