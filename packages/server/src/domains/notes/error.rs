//! Errors that end a single chapter task.
//!
//! Each variant's `Display` text becomes the chapter outcome's error message.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteTaskError {
    /// The model answered without usable text
    #[error("No AI response")]
    NoResponse,

    #[error("Generation failed: {0}")]
    Generation(String),

    /// Notes were generated but could not be saved
    #[error("Failed to save notes: {0}")]
    Persistence(String),

    #[error("Failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("Chapter task timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The spawned task panicked or was cancelled
    #[error("Chapter task aborted: {0}")]
    Aborted(String),
}

/// Message of an infrastructure error, "Unknown error" when it has none.
pub fn error_message(error: &anyhow::Error) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
