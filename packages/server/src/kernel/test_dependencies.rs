// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BaseClock, BaseCourseStatusStore, BaseNoteStore, BaseTextGenerator, Generation,
    GenerationOptions, ServerDeps,
};
use crate::common::{ChapterId, CourseId};
use crate::config::NotesConfig;

// =============================================================================
// Mock Text Generator
// =============================================================================

/// What the mock does when a prompt matches a rule.
#[derive(Debug, Clone)]
pub enum MockGeneration {
    Respond(String),
    Empty,
    Malformed,
    Fail(String),
    Panic,
}

pub struct MockTextGenerator {
    default_response: String,
    rules: Mutex<Vec<(String, MockGeneration)>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    options_seen: Mutex<Vec<GenerationOptions>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            default_response: "<h2>Mock notes</h2><p>Mock exam material.</p>".to_string(),
            rules: Mutex::new(Vec::new()),
            delay: None,
            calls: Mutex::new(Vec::new()),
            options_seen: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Text returned when no rule matches
    pub fn with_default_response(mut self, text: impl Into<String>) -> Self {
        self.default_response = text.into();
        self
    }

    /// Hold every call open for `delay` (makes overlap observable)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Apply `behavior` to prompts containing `pattern` (first matching rule wins)
    pub fn when_prompt_contains(self, pattern: impl Into<String>, behavior: MockGeneration) -> Self {
        self.rules.lock().unwrap().push((pattern.into(), behavior));
        self
    }

    pub fn fail_when_prompt_contains(self, pattern: impl Into<String>, error: impl Into<String>) -> Self {
        self.when_prompt_contains(pattern, MockGeneration::Fail(error.into()))
    }

    /// Get all prompts that were sent
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of times the generator was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Options passed with each call, in call order
    pub fn options_seen(&self) -> Vec<GenerationOptions> {
        self.options_seen.lock().unwrap().clone()
    }

    /// Highest number of calls observed in flight at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Calls currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn behavior_for(&self, prompt: &str) -> MockGeneration {
        self.rules
            .lock()
            .unwrap()
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            .map(|(_, behavior)| behavior.clone())
            .unwrap_or_else(|| MockGeneration::Respond(self.default_response.clone()))
    }
}

/// Counts a call as in flight until dropped, including when the call is cancelled.
struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
    now: usize,
}

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self { counter, now }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseTextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Generation> {
        // Record the call
        self.calls.lock().unwrap().push(prompt.to_string());
        self.options_seen.lock().unwrap().push(options.clone());

        let guard = InFlightGuard::enter(&self.in_flight);
        self.max_in_flight.fetch_max(guard.now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let behavior = self.behavior_for(prompt);
        drop(guard);

        match behavior {
            MockGeneration::Respond(text) => Ok(Generation::Text(text)),
            MockGeneration::Empty => Ok(Generation::Empty),
            MockGeneration::Malformed => Ok(Generation::Malformed("mock malformed body".into())),
            MockGeneration::Fail(error) => Err(anyhow!(error)),
            MockGeneration::Panic => panic!("mock generator panicked"),
        }
    }
}

// =============================================================================
// Mock Note Store
// =============================================================================

/// A note captured by [`MockNoteStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub chapter_id: ChapterId,
    pub course_id: CourseId,
    pub notes: String,
}

#[derive(Default)]
pub struct MockNoteStore {
    notes: Mutex<Vec<StoredNote>>,
    failures: Mutex<Vec<(String, String)>>,
    insert_attempts: AtomicUsize,
}

impl MockNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail inserts whose notes contain `pattern`
    pub fn fail_when_notes_contain(self, pattern: impl Into<String>, error: impl Into<String>) -> Self {
        self.failures
            .lock()
            .unwrap()
            .push((pattern.into(), error.into()));
        self
    }

    /// Fail every insert
    pub fn fail_all(self, error: impl Into<String>) -> Self {
        self.fail_when_notes_contain("", error)
    }

    /// Notes that were persisted
    pub fn stored(&self) -> Vec<StoredNote> {
        self.notes.lock().unwrap().clone()
    }

    /// Inserts attempted, including failed ones
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseNoteStore for MockNoteStore {
    async fn insert(&self, chapter_id: ChapterId, course_id: &CourseId, notes: &str) -> Result<()> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(pattern, _)| notes.contains(pattern.as_str()))
            .map(|(_, error)| error.clone());
        if let Some(error) = failure {
            return Err(anyhow!(error));
        }

        self.notes.lock().unwrap().push(StoredNote {
            chapter_id,
            course_id: course_id.clone(),
            notes: notes.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Mock Course Status Store
// =============================================================================

#[derive(Default)]
pub struct MockCourseStatusStore {
    calls: Mutex<Vec<CourseId>>,
    failure: Option<String>,
}

impl MockCourseStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every set_ready call fails with `error`
    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(error.into()),
        }
    }

    /// Course ids passed to set_ready, including failed attempts
    pub fn calls(&self) -> Vec<CourseId> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseCourseStatusStore for MockCourseStatusStore {
    async fn set_ready(&self, course_id: &CourseId) -> Result<()> {
        self.calls.lock().unwrap().push(course_id.clone());
        match &self.failure {
            Some(error) => Err(anyhow!(error.clone())),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Fixed Clock
// =============================================================================

/// Clock frozen at a single reading
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl BaseClock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of mocks; keeps handles so tests can inspect calls after a run.
pub struct TestDependencies {
    pub text_generator: Arc<MockTextGenerator>,
    pub note_store: Arc<MockNoteStore>,
    pub course_status: Arc<MockCourseStatusStore>,
    pub clock: Arc<FixedClock>,
    pub notes: NotesConfig,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            text_generator: Arc::new(MockTextGenerator::new()),
            note_store: Arc::new(MockNoteStore::new()),
            course_status: Arc::new(MockCourseStatusStore::new()),
            clock: Arc::new(FixedClock(1_700_000_000_000)),
            notes: NotesConfig::default(),
        }
    }

    pub fn with_text_generator(mut self, generator: MockTextGenerator) -> Self {
        self.text_generator = Arc::new(generator);
        self
    }

    pub fn with_note_store(mut self, store: MockNoteStore) -> Self {
        self.note_store = Arc::new(store);
        self
    }

    pub fn with_course_status(mut self, store: MockCourseStatusStore) -> Self {
        self.course_status = Arc::new(store);
        self
    }

    pub fn with_clock(mut self, millis: i64) -> Self {
        self.clock = Arc::new(FixedClock(millis));
        self
    }

    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.notes.concurrency_limit = limit;
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.notes.task_timeout = Some(timeout);
        self
    }

    /// ServerDeps backed by these mocks
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.text_generator.clone(),
            self.note_store.clone(),
            self.course_status.clone(),
            self.clock.clone(),
            self.notes.clone(),
        )
    }
}
