//! AI gateway error type.

use thiserror::Error;

/// Failure talking to the AI gateway.
///
/// Callers never surface these as fatal; each operation has a fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// No API key or endpoint configured
    #[error("AI gateway is not configured: {0}")]
    NotConfigured(String),

    /// Request could not be sent or the connection dropped
    #[error("AI gateway request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("AI gateway returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response carried no usable text
    #[error("AI gateway returned an empty response")]
    EmptyResponse,

    /// Response text did not match the expected shape
    #[error("AI gateway returned a malformed response: {0}")]
    Malformed(String),
}

impl GatewayError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Whether retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}
