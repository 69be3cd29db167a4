use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Default number of chapters generated concurrently.
pub const DEFAULT_NOTES_CONCURRENCY: usize = 5;

/// Default Gemini model for chapter notes.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub notes: NotesConfig,
}

/// Settings for the chapter notes batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Chapters in flight at once (window size). Always >= 1.
    pub concurrency_limit: usize,
    /// Per-chapter deadline; `None` lets every chapter run to completion.
    pub task_timeout: Option<Duration>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_NOTES_CONCURRENCY,
            task_timeout: None,
        }
    }
}

impl NotesConfig {
    /// Parse `NOTES_CONCURRENCY` / `NOTES_TASK_TIMEOUT_SECS` values.
    pub fn from_values(concurrency: Option<&str>, timeout_secs: Option<&str>) -> Result<Self> {
        let concurrency_limit = match concurrency {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("NOTES_CONCURRENCY must be a positive integer")?,
            None => DEFAULT_NOTES_CONCURRENCY,
        };
        if concurrency_limit == 0 {
            bail!("NOTES_CONCURRENCY must be at least 1");
        }

        let task_timeout = timeout_secs
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .context("NOTES_TASK_TIMEOUT_SECS must be a number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            concurrency_limit,
            task_timeout,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let notes = NotesConfig::from_values(
            env::var("NOTES_CONCURRENCY").ok().as_deref(),
            env::var("NOTES_TASK_TIMEOUT_SECS").ok().as_deref(),
        )?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            notes,
        })
    }
}
