pub mod chapter_note;

pub use chapter_note::ChapterNote;
