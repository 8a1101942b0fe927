//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml`. A missing file
//! means defaults; a file that does not parse is a configuration error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

use rigforge_core::RigForgeError;
use rigforge_core::config::AppConfig;
use rigforge_core::error::Result;

use crate::paths::RigForgePaths;

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `config.toml` from the resolved config directory.
    pub fn new(paths: &RigForgePaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| RigForgeError::config(e.to_string()))?;
        Ok(Self::with_file(path))
    }

    pub fn with_file(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    fn load_config(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            RigForgeError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }
}
