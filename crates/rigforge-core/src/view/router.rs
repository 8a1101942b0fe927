//! Screen state machine.
//!
//! `AUTH` is the only initial state. Authenticating moves to `DASHBOARD`;
//! from there the authenticated screens reach each other freely. Logging out
//! returns to `AUTH` from anywhere and drops the session. There is no
//! terminal state and nothing transitions on its own.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter};
use thiserror::Error;
use tracing::debug;

use crate::session::Session;

/// Named screens of the application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Auth,
    Dashboard,
    Builder,
    Scanner,
    Benchmark,
    Forum,
    SavedBuilds,
}

impl ViewState {
    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Auth)
    }
}

impl FromStr for ViewState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "auth" => Ok(Self::Auth),
            "dashboard" | "home" => Ok(Self::Dashboard),
            "builder" | "build" => Ok(Self::Builder),
            "scanner" | "scan" => Ok(Self::Scanner),
            "benchmark" | "stats" => Ok(Self::Benchmark),
            "forum" => Ok(Self::Forum),
            "saved_builds" | "saved" => Ok(Self::SavedBuilds),
            _ => Err(format!("Unknown screen: '{s}'")),
        }
    }
}

/// Rejected screen transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("log in first to open {0}")]
    NotAuthenticated(ViewState),

    #[error("already logged in as {0}; log out first")]
    AlreadyAuthenticated(String),

    #[error("use logout to return to the login screen")]
    UseLogout,

    #[error("log in or continue as a guest first")]
    SignInRequired,
}

/// Holds the active screen and the session that unlocks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    current: ViewState,
    session: Option<Session>,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            current: ViewState::Auth,
            session: None,
        }
    }

    pub fn current(&self) -> ViewState {
        self.current
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, or an error while on the login screen.
    pub fn require_session(&self) -> Result<&Session, NavigationError> {
        self.session.as_ref().ok_or(NavigationError::SignInRequired)
    }

    /// Starts a session and opens the dashboard.
    pub fn authenticate(&mut self, session: Session) -> Result<(), NavigationError> {
        if let Some(existing) = &self.session {
            return Err(NavigationError::AlreadyAuthenticated(
                existing.username.clone(),
            ));
        }
        debug!(username = %session.username, guest = session.is_guest, "session started");
        self.session = Some(session);
        self.current = ViewState::Dashboard;
        Ok(())
    }

    /// Ends the session and returns to the login screen.
    pub fn logout(&mut self) -> Option<Session> {
        self.current = ViewState::Auth;
        self.session.take()
    }

    /// Moves to another authenticated screen.
    pub fn navigate(&mut self, to: ViewState) -> Result<(), NavigationError> {
        if to == ViewState::Auth {
            return Err(NavigationError::UseLogout);
        }
        if self.session.is_none() {
            return Err(NavigationError::NotAuthenticated(to));
        }
        if self.current != to {
            debug!(from = %self.current, to = %to, "navigate");
            self.current = to;
        }
        Ok(())
    }
}
