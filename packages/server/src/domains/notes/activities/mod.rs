pub mod batch_runner;
pub mod chapter_task;
pub mod generate_notes;
pub mod reconcile;

pub use batch_runner::BoundedBatchRunner;
pub use chapter_task::ChapterTask;
pub use generate_notes::{generate_course_notes, run_notes_batch};
pub use reconcile::reconcile_course_status;
