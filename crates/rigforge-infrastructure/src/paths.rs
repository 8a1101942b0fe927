//! Unified path management for RigForge files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/rigforge/          # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── rigforge.log.YYYY-MM-DD
//!
//! ~/.local/share/rigforge/     # Data directory
//! └── pc_builder_saves.json    # Saved build list
//! ```
//!
//! A base path override puts everything under `<base>/config` and
//! `<base>/data` instead, which tests and `--home` use.

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "rigforge";

/// Fixed key of the saved build document.
pub const SAVED_BUILDS_KEY: &str = "pc_builder_saves";

/// Errors that can occur during path resolution.
#[derive(Error, Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    #[error("Cannot determine the {0} directory")]
    DirNotFound(&'static str),
}

/// Resolves every file location used by RigForge.
#[derive(Debug, Clone, Default)]
pub struct RigForgePaths {
    base: Option<PathBuf>,
}

impl RigForgePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/rigforge/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::DirNotFound("config")),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/rigforge/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::DirNotFound("data")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Location of `secret.json`.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Location of the saved build document inside `data_dir`.
    pub fn saved_builds_file(data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{SAVED_BUILDS_KEY}.json"))
    }
}
