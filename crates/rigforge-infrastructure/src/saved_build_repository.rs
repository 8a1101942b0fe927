//! Saved build repository backed by a single JSON document.
//!
//! File location: `{data_dir}/pc_builder_saves.json`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use rigforge_core::RigForgeError;
use rigforge_core::build::{Build, SavedBuildRepository};
use rigforge_core::error::Result;

use crate::dto::SavedBuildDto;
use crate::paths::RigForgePaths;
use crate::storage::AtomicJsonFile;

/// Stores the saved build list as one JSON array, overwritten on every write.
#[derive(Debug, Clone)]
pub struct JsonSavedBuildRepository {
    file: AtomicJsonFile<Vec<SavedBuildDto>>,
}

impl JsonSavedBuildRepository {
    /// Creates a repository storing its document inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self::with_file(RigForgePaths::saved_builds_file(data_dir))
    }

    /// Creates a repository for an explicit document path.
    pub fn with_file(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl SavedBuildRepository for JsonSavedBuildRepository {
    async fn load_all(&self) -> Result<Vec<Build>> {
        let file = self.file.clone();
        let loaded = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| RigForgeError::internal(format!("Storage task failed: {e}")))?;

        let builds = loaded.map_err(RigForgeError::from).and_then(|dtos| {
            dtos.unwrap_or_default()
                .into_iter()
                .map(Build::try_from)
                .collect::<Result<Vec<_>>>()
        });

        match builds {
            Ok(builds) => {
                debug!(count = builds.len(), "loaded saved builds");
                Ok(builds)
            }
            Err(err) => {
                warn!(
                    path = %self.file.path().display(),
                    error = %err,
                    "saved builds unreadable; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, builds: &[Build]) -> Result<()> {
        let dtos: Vec<SavedBuildDto> = builds.iter().map(SavedBuildDto::from).collect();
        let file = self.file.clone();

        tokio::task::spawn_blocking(move || file.save_locked(&dtos))
            .await
            .map_err(|e| RigForgeError::internal(format!("Storage task failed: {e}")))?
            .map_err(|e| RigForgeError::io(format!("Failed to write saved builds: {e}")))?;

        debug!(count = builds.len(), "saved build list written");
        Ok(())
    }
}
