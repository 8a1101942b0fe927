//! Application configuration models.
//!
//! `config.toml` holds non-sensitive settings; API keys live in
//! `secret.json` (see [`SecretConfig`]).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root of `config.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gemini: GeminiSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the directory holding saved builds.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Root of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSecret>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
}

impl std::fmt::Debug for GeminiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSecret")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [gemini]
            model = "gemini-2.5-pro"
            "#,
        )
        .unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_secret_debug_redacts_key() {
        let secret = GeminiSecret {
            api_key: "sk-very-secret".to_string(),
        };
        assert!(!format!("{secret:?}").contains("sk-very-secret"));
    }
}
