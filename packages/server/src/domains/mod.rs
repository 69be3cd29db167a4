// Business domains
pub mod courses;
pub mod notes;
