//! Inbound `notes.generate` event payload.
//!
//! The outline step emits the freshly inserted study material row:
//!
//! ```json
//! { "course": [ { "STUDY_MATERIAL_TABLE": {
//!     "courseId": "...",
//!     "courseLayout": { "chapters": [ { "chapterTitle": "...", ... } ] }
//! } } ] }
//! ```
//!
//! A flat `{ "courseId": "...", "chapters": [...] }` body is accepted too.

use serde::Deserialize;
use serde_json::Value;

use super::types::{ChapterSpec, CourseGenerationRequest, SkipReason};
use crate::common::CourseId;

/// Event name that starts a chapter notes batch.
pub const GENERATE_NOTES_EVENT: &str = "notes.generate";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNotesEvent {
    /// Expected to be an array of [`CourseRecord`]; anything else counts as no data.
    #[serde(default)]
    pub course: Option<Value>,

    #[serde(default)]
    pub course_id: Option<Value>,

    #[serde(default)]
    pub chapters: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "STUDY_MATERIAL_TABLE", default)]
    pub study_material: Option<StudyMaterialPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterialPayload {
    #[serde(default)]
    pub course_id: Option<Value>,

    #[serde(default)]
    pub course_layout: Option<Value>,
}

impl GenerateNotesEvent {
    /// Flat form event.
    pub fn new(course_id: impl Into<String>, chapters: Vec<Value>) -> Self {
        Self {
            course: None,
            course_id: Some(Value::String(course_id.into())),
            chapters: Some(Value::Array(chapters)),
        }
    }

    /// Extract the chapters and course id, or say why the batch is skipped.
    pub fn validate(&self) -> Result<CourseGenerationRequest, SkipReason> {
        let (course_id, chapters) = match &self.course {
            Some(course) => {
                let Some(first) = course.as_array().and_then(|records| records.first()) else {
                    return Err(SkipReason::NoCourseData);
                };
                let record: CourseRecord = match serde_json::from_value(first.clone()) {
                    Ok(record) => record,
                    Err(_) => return Err(SkipReason::MissingRequiredData),
                };
                match &record.study_material {
                    Some(material) => (
                        material.course_id.as_ref().and_then(course_id_from),
                        material
                            .course_layout
                            .as_ref()
                            .and_then(|layout| layout.get("chapters"))
                            .map(chapters_from)
                            .unwrap_or_default(),
                    ),
                    None => (None, Vec::new()),
                }
            }
            None if self.course_id.is_none() && self.chapters.is_none() => {
                return Err(SkipReason::NoCourseData);
            }
            None => (
                self.course_id.as_ref().and_then(course_id_from),
                self.chapters.as_ref().map(chapters_from).unwrap_or_default(),
            ),
        };

        let course_id = course_id.ok_or(SkipReason::MissingRequiredData)?;
        CourseGenerationRequest::new(chapters, course_id).ok_or(SkipReason::MissingRequiredData)
    }
}

fn course_id_from(value: &Value) -> Option<CourseId> {
    match value {
        Value::String(s) => CourseId::parse(s.as_str()),
        Value::Number(n) => CourseId::parse(n.to_string()),
        _ => None,
    }
}

/// Non-array chapter lists count as empty.
fn chapters_from(value: &Value) -> Vec<ChapterSpec> {
    value
        .as_array()
        .map(|items| items.iter().cloned().map(ChapterSpec::new).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> GenerateNotesEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn nested_study_material_payload() {
        let request = event(json!({
            "course": [{
                "STUDY_MATERIAL_TABLE": {
                    "courseId": "course-42",
                    "courseLayout": {
                        "courseTitle": "Python Basics",
                        "chapters": [
                            { "chapterTitle": "Variables" },
                            { "chapterTitle": "Loops" }
                        ]
                    }
                }
            }]
        }))
        .validate()
        .unwrap();

        assert_eq!(request.course_id.as_str(), "course-42");
        assert_eq!(request.chapters.len(), 2);
        assert_eq!(request.chapters[1].title(), Some("Loops"));
    }

    #[test]
    fn flat_payload() {
        let request = GenerateNotesEvent::new("c-1", vec![json!({"title": "One"})])
            .validate()
            .unwrap();
        assert_eq!(request.course_id.as_str(), "c-1");
        assert_eq!(request.chapters.len(), 1);
    }

    #[test]
    fn numeric_course_id_is_accepted() {
        let request = event(json!({ "courseId": 7, "chapters": [{}] }))
            .validate()
            .unwrap();
        assert_eq!(request.course_id.as_str(), "7");
    }

    #[test]
    fn no_course_data() {
        assert_eq!(event(json!({})).validate(), Err(SkipReason::NoCourseData));
        assert_eq!(
            event(json!({ "course": [] })).validate(),
            Err(SkipReason::NoCourseData)
        );
    }

    #[test]
    fn non_array_course_is_no_course_data() {
        for course in [json!({}), json!("course-1"), json!(7), json!(null)] {
            assert_eq!(
                event(json!({ "course": course.clone() })).validate(),
                Err(SkipReason::NoCourseData),
                "course: {course}"
            );
        }
    }

    #[test]
    fn missing_required_data() {
        let cases = [
            json!({ "course": [{}] }),
            json!({ "course": ["not a record"] }),
            json!({ "course": [{ "STUDY_MATERIAL_TABLE": "not an object" }] }),
            json!({ "course": [{ "STUDY_MATERIAL_TABLE": { "courseId": "c-1" } }] }),
            json!({ "course": [{ "STUDY_MATERIAL_TABLE": {
                "courseId": "c-1", "courseLayout": { "chapters": [] } } }] }),
            json!({ "course": [{ "STUDY_MATERIAL_TABLE": {
                "courseId": "c-1", "courseLayout": { "chapters": "not a list" } } }] }),
            json!({ "course": [{ "STUDY_MATERIAL_TABLE": {
                "courseId": null, "courseLayout": { "chapters": [{}] } } }] }),
            json!({ "course": [{ "STUDY_MATERIAL_TABLE": {
                "courseId": "  ", "courseLayout": { "chapters": [{}] } } }] }),
            json!({ "courseId": null, "chapters": [{}] }),
            json!({ "courseId": "c-1", "chapters": [] }),
        ];

        for case in cases {
            assert_eq!(
                event(case.clone()).validate(),
                Err(SkipReason::MissingRequiredData),
                "case: {case}"
            );
        }
    }
}
