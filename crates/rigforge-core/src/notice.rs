//! User-facing notices for blocked or degraded operations.

use std::fmt;

use crate::scanner::CameraError;

/// A dismissible message explaining why an action did nothing or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The action needs at least one component.
    EmptyBuild { action: &'static str },
    /// The user cancelled the name prompt.
    SaveCancelled,
    /// The user declined a deletion.
    DeleteDeclined,
    /// Only registered users can share builds.
    AccountRequired,
    /// Nobody is logged in yet.
    SignInRequired,
    /// Scanning needs the scanner screen.
    ScannerClosed,
    /// The scanner got an answer but no component.
    CouldNotIdentify,
    /// No frame could be captured.
    Camera(CameraError),
    /// The gateway failed and a fallback was used.
    GatewayUnavailable,
    /// Another request of the same kind is still running.
    AlreadyRunning { action: &'static str },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBuild { action } => {
                write!(f, "Your build is empty. Add components before you {action}.")
            }
            Self::SaveCancelled => write!(f, "Save cancelled."),
            Self::DeleteDeclined => write!(f, "Nothing deleted."),
            Self::AccountRequired => write!(f, "You need an account to share your build."),
            Self::SignInRequired => write!(f, "Log in or continue as a guest first."),
            Self::ScannerClosed => write!(f, "Open the scanner before scanning a part."),
            Self::CouldNotIdentify => write!(
                f,
                "Could not identify the component. Try again with better lighting."
            ),
            Self::Camera(err) => write!(f, "Scanner error: {err}"),
            Self::GatewayUnavailable => {
                write!(f, "The AI service is unavailable right now. Showing a fallback.")
            }
            Self::AlreadyRunning { action } => write!(f, "Already running: {action}."),
        }
    }
}
