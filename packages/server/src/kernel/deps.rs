//! Server dependencies for domain workflows (using traits for testability)
//!
//! This module provides the central dependency container used by the notes
//! workflow. All external services use trait abstractions to enable testing.

use std::sync::Arc;

use crate::config::NotesConfig;
use crate::kernel::{
    BaseClock, BaseCourseStatusStore, BaseNoteStore, BaseTextGenerator, GenerationOptions,
};

/// Server dependencies accessible to workflows (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// LLM used for chapter notes
    pub text_generator: Arc<dyn BaseTextGenerator>,
    pub note_store: Arc<dyn BaseNoteStore>,
    pub course_status: Arc<dyn BaseCourseStatusStore>,
    /// Source of the per-run chapter id base
    pub clock: Arc<dyn BaseClock>,
    /// Options sent with every chapter notes prompt
    pub generation_options: GenerationOptions,
    pub notes: NotesConfig,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        text_generator: Arc<dyn BaseTextGenerator>,
        note_store: Arc<dyn BaseNoteStore>,
        course_status: Arc<dyn BaseCourseStatusStore>,
        clock: Arc<dyn BaseClock>,
        notes: NotesConfig,
    ) -> Self {
        Self {
            text_generator,
            note_store,
            course_status,
            clock,
            generation_options: GenerationOptions::default(),
            notes,
        }
    }
}
