//! Build domain models and repository traits.

mod model;
mod repository;

pub use model::{Build, CURRENT_BUILD_ID, DEFAULT_BUILD_NAME, LineId, LineItem};
pub use repository::SavedBuildRepository;
