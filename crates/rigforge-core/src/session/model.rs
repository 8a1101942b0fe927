//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RigForgeError};

/// Username given to guest sessions.
pub const GUEST_USERNAME: &str = "Guest";

/// The authenticated user of the running application.
///
/// Lives only in memory; logging out discards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub is_guest: bool,
}

impl Session {
    /// Starts a named session. The username is trimmed and must not be empty.
    pub fn user(username: &str) -> Result<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RigForgeError::invalid_input("username must not be empty"));
        }
        Ok(Self {
            username: username.to_string(),
            is_guest: false,
        })
    }

    pub fn guest() -> Self {
        Self {
            username: GUEST_USERNAME.to_string(),
            is_guest: true,
        }
    }

    /// Short status label shown next to the username.
    pub fn tier_label(&self) -> &'static str {
        if self.is_guest { "Guest" } else { "Pro" }
    }
}
