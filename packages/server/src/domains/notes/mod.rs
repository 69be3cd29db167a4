pub mod activities;
pub mod error;
pub mod events;
pub mod models;
pub mod prompts;
pub mod types;

pub use activities::{
    generate_course_notes, reconcile_course_status, run_notes_batch, BoundedBatchRunner,
    ChapterTask,
};
pub use error::NoteTaskError;
pub use events::register_notes_events;
pub use models::ChapterNote;
pub use types::{BatchResult, ChapterOutcome, GenerateNotesResult, OutcomeStatus, StatusUpdate};
