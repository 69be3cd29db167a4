use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::CourseId;

/// One chapter of a course outline.
///
/// The payload (title, summary, topic list...) is opaque; it only has to
/// serialize into the notes prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterSpec(serde_json::Value);

impl ChapterSpec {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Best-effort title for logs (`chapterTitle`, `chapter_title` or `title`).
    pub fn title(&self) -> Option<&str> {
        ["chapterTitle", "chapter_title", "title"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(|v| v.as_str()))
    }
}

/// A validated request to generate notes for every chapter of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGenerationRequest {
    /// Never empty
    pub chapters: Vec<ChapterSpec>,
    pub course_id: CourseId,
}

impl CourseGenerationRequest {
    /// `None` when there are no chapters.
    pub fn new(chapters: Vec<ChapterSpec>, course_id: CourseId) -> Option<Self> {
        if chapters.is_empty() {
            return None;
        }
        Some(Self {
            chapters,
            course_id,
        })
    }
}

/// Why an inbound event did not start a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The event carried no course record at all
    NoCourseData,
    /// A course record was present but its chapters or course id were missing
    MissingRequiredData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCourseData => f.write_str("No course data provided"),
            SkipReason::MissingRequiredData => f.write_str("Missing required data"),
        }
    }
}
