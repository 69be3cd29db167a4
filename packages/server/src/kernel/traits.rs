// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (prompting, batching, reconciliation) lives in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseTextGenerator, BaseNoteStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{ChapterId, CourseId};

// =============================================================================
// Text Generation Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

/// Sampling configuration passed through to the model unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// e.g. "application/json" to request structured output
    pub response_mime_type: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: Some("application/json".to_string()),
        }
    }
}

/// What came back from a generation call that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Usable text
    Text(String),
    /// The model answered with nothing usable (blocked, no candidates, empty text)
    Empty,
    /// The response could not be read; carries a description for logs
    Malformed(String),
}

impl Generation {
    /// Non-empty text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Generation::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

#[async_trait]
pub trait BaseTextGenerator: Send + Sync {
    /// Generate text for a prompt.
    ///
    /// `Err` is reserved for calls that failed (transport, API status);
    /// a response without usable text is `Ok(Generation::Empty | Generation::Malformed)`.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation>;
}

// =============================================================================
// Persistence Traits (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseNoteStore: Send + Sync {
    /// Persist generated notes for one chapter of a course.
    async fn insert(&self, chapter_id: ChapterId, course_id: &CourseId, notes: &str) -> Result<()>;
}

#[async_trait]
pub trait BaseCourseStatusStore: Send + Sync {
    /// Mark the course record as Ready.
    async fn set_ready(&self, course_id: &CourseId) -> Result<()>;
}

// =============================================================================
// Clock Trait (Infrastructure)
// =============================================================================

pub trait BaseClock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BaseClock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_notes_config() {
        let options = GenerationOptions::default();
        assert_eq!(options.temperature, 1.0);
        assert_eq!(options.top_p, 0.95);
        assert_eq!(options.top_k, 40);
        assert_eq!(options.max_output_tokens, 8192);
        assert_eq!(options.response_mime_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn only_non_empty_text_is_usable() {
        assert_eq!(
            Generation::Text("<p>x</p>".into()).into_text().as_deref(),
            Some("<p>x</p>")
        );
        assert_eq!(Generation::Text(String::new()).into_text(), None);
        assert_eq!(Generation::Empty.into_text(), None);
        assert_eq!(Generation::Malformed("bad".into()).into_text(), None);
    }
}
