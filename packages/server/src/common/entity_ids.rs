//! Identifier types for course entities.
//!
//! Course ids come from upstream (the outline step) and are opaque strings.
//! Chapter ids are numeric and only unique within one notes batch.
//!
//! # Example
//!
//! ```rust
//! use coursegen_core::common::{ChapterId, CourseId};
//!
//! let course_id = CourseId::parse("c0ffee").unwrap();
//! assert!(CourseId::parse("   ").is_none());
//!
//! // Same clock reading, different positions => different ids
//! assert_ne!(ChapterId::derive(1_700_000_000_000, 0), ChapterId::derive(1_700_000_000_000, 1));
//! # let _ = course_id;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Opaque identifier of a course (`study_materials.course_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Returns `None` for blank input.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric chapter identifier stored with each generated note.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ChapterId(i64);

impl ChapterId {
    /// Clock reading (ms) for the run plus the chapter's absolute position.
    ///
    /// Distinct positions always yield distinct ids for the same reading.
    /// Addition wraps, so a reading near `i64::MAX` still gives unique ids.
    pub fn derive(clock_millis: i64, position: usize) -> Self {
        Self(clock_millis.wrapping_add(position as i64))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
