//! Secret service implementation.
//!
//! Reads API keys from `secret.json`. A key found in the environment
//! (`GEMINI_API_KEY`, then `API_KEY`) takes precedence over the file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

use rigforge_core::RigForgeError;
use rigforge_core::config::{GeminiSecret, SecretConfig};
use rigforge_core::error::Result;
use rigforge_core::secret::SecretService;

use crate::paths::RigForgePaths;

/// Environment variables checked for the Gemini key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Service for reading secret configuration.
///
/// The file is read once and cached.
#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    env_vars: Vec<&'static str>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(paths: &RigForgePaths) -> Result<Self> {
        let path = paths
            .secret_file()
            .map_err(|e| RigForgeError::config(e.to_string()))?;
        Ok(Self::with_file(path))
    }

    pub fn with_file(path: PathBuf) -> Self {
        Self {
            path,
            env_vars: API_KEY_ENV_VARS.to_vec(),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces the environment variables consulted for the key.
    pub fn with_env_vars(mut self, env_vars: &[&'static str]) -> Self {
        self.env_vars = env_vars.to_vec();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        {
            let read_lock = self.secrets.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.read_file()?;
        if let Some((var, key)) = self.env_key() {
            debug!(var, "using API key from environment");
            loaded.gemini = Some(GeminiSecret { api_key: key });
        }

        let mut write_lock = self.secrets.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    fn read_file(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Ok(SecretConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            RigForgeError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }

    fn env_key(&self) -> Option<(&'static str, String)> {
        self.env_vars.iter().find_map(|var| {
            std::env::var(var)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*var, value))
        })
    }
}

#[async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_has_no_key() {
        let temp_dir = TempDir::new().unwrap();
        let service =
            SecretServiceImpl::with_file(temp_dir.path().join("secret.json")).with_env_vars(&[]);

        assert!(!service.secret_file_exists().await);
        assert!(service.load_secrets().await.unwrap().gemini.is_none());
    }

    #[tokio::test]
    async fn test_reads_key_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini": {"api_key": "from-file"}}"#).unwrap();
        let service = SecretServiceImpl::with_file(path).with_env_vars(&[]);

        assert!(service.secret_file_exists().await);
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.gemini.unwrap().api_key, "from-file");
    }

    #[tokio::test]
    async fn test_environment_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini": {"api_key": "from-file"}}"#).unwrap();
        // PATH is always set, which makes it a stable stand-in.
        let service = SecretServiceImpl::with_file(path).with_env_vars(&["PATH"]);

        let secrets = service.load_secrets().await.unwrap();
        assert_ne!(secrets.gemini.unwrap().api_key, "from-file");
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, "{ nope").unwrap();
        let service = SecretServiceImpl::with_file(path).with_env_vars(&[]);

        assert!(service.load_secrets().await.unwrap_err().is_config());
    }
}
