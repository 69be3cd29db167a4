//! Windowed fan-out of chapter tasks.
//!
//! Chapters are split into consecutive windows of `concurrency_limit`. Every
//! chapter in a window runs as its own tokio task; the next window starts
//! only after all of them have settled. Outcomes come back in input order.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, info};

use super::chapter_task::ChapterTask;
use crate::config::NotesConfig;
use crate::domains::courses::ChapterSpec;
use crate::domains::notes::error::NoteTaskError;
use crate::domains::notes::types::ChapterOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedBatchRunner {
    concurrency_limit: usize,
    task_timeout: Option<Duration>,
}

impl BoundedBatchRunner {
    /// A limit of 0 is treated as 1.
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            concurrency_limit: concurrency_limit.max(1),
            task_timeout: None,
        }
    }

    pub fn from_config(config: &NotesConfig) -> Self {
        Self {
            task_timeout: config.task_timeout,
            ..Self::new(config.concurrency_limit)
        }
    }

    /// Give up on a chapter after `timeout`; it is recorded as failed.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = Some(timeout);
        self
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Run `task` for every chapter.
    ///
    /// Returns exactly one outcome per chapter, in input order.
    pub async fn run(&self, task: &ChapterTask, chapters: Vec<ChapterSpec>) -> Vec<ChapterOutcome> {
        let total = chapters.len();
        let mut outcomes = Vec::with_capacity(total);

        for (window, chunk) in chapters.chunks(self.concurrency_limit).enumerate() {
            let offset = window * self.concurrency_limit;

            debug!(
                course_id = %task.course_id(),
                window = window + 1,
                size = chunk.len(),
                "Launching chapter window"
            );

            let handles: Vec<_> = chunk
                .iter()
                .enumerate()
                .map(|(i, chapter)| {
                    let position = offset + i;
                    let handle = tokio::spawn(run_one(
                        task.clone(),
                        chapter.clone(),
                        position,
                        self.task_timeout,
                    ));
                    async move { (position, handle.await) }
                })
                .collect();

            // join_all keeps launch order, so positions stay aligned
            for (position, joined) in join_all(handles).await {
                let outcome = joined.unwrap_or_else(|e| {
                    error!(
                        course_id = %task.course_id(),
                        position,
                        error = %e,
                        "Chapter task terminated unexpectedly"
                    );
                    ChapterOutcome::failed(
                        task.chapter_id(position),
                        NoteTaskError::Aborted(e.to_string()),
                    )
                });
                outcomes.push(outcome);
            }
        }

        info!(
            course_id = %task.course_id(),
            chapters = total,
            succeeded = outcomes.iter().filter(|o| o.is_success()).count(),
            "Chapter notes batch settled"
        );

        outcomes
    }
}

async fn run_one(
    task: ChapterTask,
    chapter: ChapterSpec,
    position: usize,
    timeout: Option<Duration>,
) -> ChapterOutcome {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, task.execute(&chapter, position)).await {
            Ok(outcome) => outcome,
            Err(_) => ChapterOutcome::failed(task.chapter_id(position), NoteTaskError::Timeout(limit)),
        },
        None => task.execute(&chapter, position).await,
    }
}
