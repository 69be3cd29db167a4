use crate::domains::courses::{GenerateNotesEvent, GENERATE_NOTES_EVENT};
use crate::kernel::EventRegistry;

use super::activities::generate_course_notes;

/// Register the notes domain's event handlers.
pub fn register_notes_events(registry: &mut EventRegistry) {
    registry.register::<GenerateNotesEvent, _, _, _>(GENERATE_NOTES_EVENT, |event, deps| async move {
        Ok(generate_course_notes(&event, &deps).await)
    });
}
