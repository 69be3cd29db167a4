//! Event registry for inbound triggers.
//!
//! The registry maps event names (e.g., "notes.generate") to:
//! - Deserializers that reconstruct typed event payloads from JSON
//! - Handlers that run the workflow and produce a JSON completion payload
//!
//! This lets the HTTP layer dispatch events to domain workflows without
//! knowing the concrete payload types.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::kernel::ServerDeps;

/// Errors raised while dispatching an event.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No handler registered for event: {0}")]
    UnknownEvent(String),

    #[error("Invalid payload for {event}: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

/// Type alias for the async handler function.
///
/// Handlers take the raw payload and ServerDeps and return the completion payload.
type BoxedHandler = Box<
    dyn Fn(
            serde_json::Value,
            Arc<ServerDeps>,
        ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, DispatchError>> + Send>>
        + Send
        + Sync,
>;

/// Registry that maps event names to handlers.
///
/// Each domain registers its events at startup.
///
/// # Example
///
/// ```ignore
/// let mut registry = EventRegistry::new();
///
/// registry.register::<GenerateNotesEvent, _, _, _>(
///     GENERATE_NOTES_EVENT,
///     |event, deps| async move { Ok(generate_course_notes(&event, &deps).await) },
/// );
///
/// let payload = registry.dispatch("notes.generate", data, deps).await?;
/// ```
#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<&'static str, BoxedHandler>,
}

impl EventRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register an event name with its handler.
    ///
    /// The payload is deserialized into `E` before the handler runs; the
    /// handler's output is serialized back to JSON.
    pub fn register<E, R, F, Fut>(&mut self, event: &'static str, handler: F)
    where
        E: DeserializeOwned + Send + 'static,
        R: Serialize,
        F: Fn(E, Arc<ServerDeps>) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    {
        let boxed: BoxedHandler = Box::new(move |value, deps| {
            let handler = handler.clone();
            Box::pin(async move {
                let payload: E = serde_json::from_value(value).map_err(|source| {
                    DispatchError::InvalidPayload {
                        event: event.to_string(),
                        source,
                    }
                })?;
                let output = handler(payload, deps).await?;
                serde_json::to_value(output).map_err(|e| DispatchError::Handler(e.into()))
            })
        });

        self.handlers.insert(event, boxed);
    }

    /// Dispatch an event to its registered handler.
    pub async fn dispatch(
        &self,
        event: &str,
        payload: serde_json::Value,
        deps: Arc<ServerDeps>,
    ) -> Result<serde_json::Value, DispatchError> {
        let handler = self
            .handlers
            .get(event)
            .ok_or_else(|| DispatchError::UnknownEvent(event.to_string()))?;

        handler(payload, deps).await
    }

    /// Check if an event name is registered.
    pub fn is_registered(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Get all registered event names.
    pub fn registered_events(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }
}
