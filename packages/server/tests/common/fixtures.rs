//! Test fixtures for building chapter lists and notes events.
#![allow(dead_code)]

use coursegen_core::common::CourseId;
use coursegen_core::domains::courses::{ChapterSpec, CourseGenerationRequest, GenerateNotesEvent};
use serde_json::{json, Value};

/// Title used for the chapter at `position`
pub fn chapter_title(position: usize) -> String {
    format!("Chapter {:02}", position)
}

/// Raw chapter JSON as the outline step produces it
pub fn chapter_json(position: usize) -> Value {
    json!({
        "chapterTitle": chapter_title(position),
        "chapterSummary": format!("Summary of chapter {}", position),
        "topics": [format!("Topic {}.1", position), format!("Topic {}.2", position)],
    })
}

pub fn chapters(n: usize) -> Vec<ChapterSpec> {
    (0..n).map(|i| ChapterSpec::new(chapter_json(i))).collect()
}

pub fn course_id() -> CourseId {
    CourseId::parse("course-123").expect("valid course id")
}

pub fn request(n: usize) -> CourseGenerationRequest {
    CourseGenerationRequest::new(chapters(n), course_id()).expect("non-empty chapters")
}

/// Event body in the shape emitted by the outline step
pub fn study_material_event_json(course_id: Value, chapters: Value) -> Value {
    json!({
        "course": [{
            "STUDY_MATERIAL_TABLE": {
                "courseId": course_id,
                "topic": "Python",
                "courseType": "Exam",
                "courseLayout": {
                    "courseTitle": "Python for Exams",
                    "chapters": chapters,
                }
            }
        }]
    })
}

pub fn notes_event(n: usize) -> GenerateNotesEvent {
    let chapters: Vec<Value> = (0..n).map(chapter_json).collect();
    serde_json::from_value(study_material_event_json(json!("course-123"), json!(chapters)))
        .expect("valid event")
}
