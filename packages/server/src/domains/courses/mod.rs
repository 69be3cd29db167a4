pub mod events;
pub mod models;
pub mod types;

pub use events::{GenerateNotesEvent, GENERATE_NOTES_EVENT};
pub use models::StudyMaterial;
pub use types::{ChapterSpec, CourseGenerationRequest, SkipReason};
