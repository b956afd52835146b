//! Error kinds surfaced by the EOS client
//!
//! Every hard failure of a listing call maps to exactly one variant:
//! - identity resolution (before any process is spawned)
//! - process spawn / timeout / exit status
//! - protocol decoding of the tool's answers
//!
//! Soft problems (non-numeric fields, unparsable uptime) are logged and never
//! reach this type.

use std::time::Duration;

/// Errors possible while talking to the EOS admin tool
#[derive(Debug, thiserror::Error)]
pub enum EosError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("User lookup failed for {user}: {source}")]
    UserLookup {
        user: String,
        #[source]
        source: nix::Error,
    },
    #[error("Failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),
    #[error("Command output still open {0:?} after exit, output truncated")]
    OutputIncomplete(Duration),
    #[error("Target not found: {stderr}")]
    NotFound { stderr: String },
    #[error("Command failed (exit code {code:?}): {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EosError {
    /// Whether a later call may succeed without any change on the caller side
    pub fn is_retryable(&self) -> bool {
        matches!(self, EosError::Timeout(_) | EosError::OutputIncomplete(_))
    }
}

pub type Result<T> = std::result::Result<T, EosError>;
