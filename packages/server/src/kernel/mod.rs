//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod events;
pub mod gemini;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use events::{DispatchError, EventRegistry};
pub use gemini::GeminiTextGenerator;
pub use stores::{PostgresCourseStatusStore, PostgresNoteStore};
pub use test_dependencies::TestDependencies;
pub use traits::*;
