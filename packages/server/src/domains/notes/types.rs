//! Outcome types for a chapter notes batch.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::common::ChapterId;
use crate::domains::courses::SkipReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Terminal result for one chapter. Exactly one per input chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterOutcome {
    pub chapter_id: ChapterId,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChapterOutcome {
    pub fn success(chapter_id: ChapterId) -> Self {
        Self {
            chapter_id,
            status: OutcomeStatus::Success,
            error: None,
        }
    }

    pub fn failed(chapter_id: ChapterId, error: impl Display) -> Self {
        let message = error.to_string();
        Self {
            chapter_id,
            status: OutcomeStatus::Failed,
            error: Some(if message.is_empty() {
                "Unknown error".to_string()
            } else {
                message
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Result of the single course status write after a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error")]
pub enum StatusUpdate {
    Success,
    Skipped,
    Failed(String),
}

impl Display for StatusUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusUpdate::Success => f.write_str("Success"),
            StatusUpdate::Skipped => f.write_str("Skipped"),
            StatusUpdate::Failed(message) => write!(f, "Failed: {}", message),
        }
    }
}

/// Outcomes of every chapter plus the status write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub outcomes: Vec<ChapterOutcome>,
    pub status_update: StatusUpdate,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Completion payload of a `notes.generate` event.
///
/// Serializes as `{ "notesResult": ..., "updateCourseStatusResult": ... }`;
/// a skipped event reports its reason as `notesResult` and `Skipped` as the
/// status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateNotesResult {
    Skipped { reason: SkipReason },
    Completed(BatchResult),
}

impl GenerateNotesResult {
    pub fn status_update(&self) -> StatusUpdate {
        match self {
            GenerateNotesResult::Skipped { .. } => StatusUpdate::Skipped,
            GenerateNotesResult::Completed(batch) => batch.status_update.clone(),
        }
    }

    pub fn batch(&self) -> Option<&BatchResult> {
        match self {
            GenerateNotesResult::Skipped { .. } => None,
            GenerateNotesResult::Completed(batch) => Some(batch),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum NotesResultPayload<'a> {
    Skipped(String),
    Outcomes(&'a [ChapterOutcome]),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateNotesPayload<'a> {
    notes_result: NotesResultPayload<'a>,
    update_course_status_result: StatusUpdate,
}

impl Serialize for GenerateNotesResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let notes_result = match self {
            GenerateNotesResult::Skipped { reason } => NotesResultPayload::Skipped(reason.to_string()),
            GenerateNotesResult::Completed(batch) => NotesResultPayload::Outcomes(&batch.outcomes),
        };
        GenerateNotesPayload {
            notes_result,
            update_course_status_result: self.status_update(),
        }
        .serialize(serializer)
    }
}
