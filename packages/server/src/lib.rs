// Course Notes Generator - API Core
//
// Generates exam-oriented notes for every chapter of a course outline and
// flips the course to Ready once the batch settles.
//
// Domain logic lives in domains/*; capabilities (LLM, stores, clock) are
// kernel traits so every workflow runs against mocks in tests.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
