pub mod study_material;

pub use study_material::{StudyMaterial, STATUS_READY};
