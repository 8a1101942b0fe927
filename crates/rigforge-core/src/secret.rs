//! Secret management service trait.
//!
//! Defines the interface for loading secret configuration (API keys).

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for managing secret configuration.
///
/// Implementations must never log or echo the secrets they load.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
