//! Data transfer objects for persisted documents.

pub mod saved_build;

pub use saved_build::{ComponentDto, SavedBuildDto};
