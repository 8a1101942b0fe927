//! Saved build repository trait.

use async_trait::async_trait;

use super::model::Build;
use crate::error::Result;

/// Repository holding the saved build list as a single document.
///
/// Implementations read and overwrite the whole list; there are no
/// incremental updates.
#[async_trait]
pub trait SavedBuildRepository: Send + Sync {
    /// Loads the saved builds, newest first.
    ///
    /// A missing, unreadable or corrupt document yields an empty list.
    async fn load_all(&self) -> Result<Vec<Build>>;

    /// Replaces the stored list with `builds`.
    async fn save_all(&self, builds: &[Build]) -> Result<()>;
}
