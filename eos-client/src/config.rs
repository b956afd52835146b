//! Client options threaded through every command execution
//!
//! Handles:
//! - Location of the `eos` binary
//! - MGM endpoint exported as `EOS_MGM_URL`
//! - Per-call deadline
//! - Command-line logging switch

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EOS_BINARY: &str = "/usr/bin/eos";
pub const DEFAULT_MGM_URL: &str = "root://eos-example.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Path of the `eos` admin tool
    pub binary: PathBuf,
    /// URL of the EOS MGM, the only variable in the child environment
    pub mgm_url: String,
    /// Deadline for a single listing call
    pub timeout_secs: u64,
    /// Log every executed command line at info level
    pub enable_logging: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_EOS_BINARY),
            mgm_url: DEFAULT_MGM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_logging: false,
        }
    }
}

impl ClientOptions {
    pub fn new(mgm_url: impl Into<String>) -> Self {
        Self {
            mgm_url: mgm_url.into(),
            ..Self::default()
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Deadline applied to one listing call (never zero)
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ClientOptions::default();
        assert_eq!(opts.binary, PathBuf::from("/usr/bin/eos"));
        assert_eq!(opts.mgm_url, "root://eos-example.org");
        assert_eq!(opts.timeout(), Duration::from_secs(10));
        assert!(!opts.enable_logging);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let opts: ClientOptions =
            serde_json::from_str(r#"{"mgm_url": "root://eospps.cern.ch"}"#).unwrap();
        assert_eq!(opts.mgm_url, "root://eospps.cern.ch");
        assert_eq!(opts.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(opts.binary, PathBuf::from(DEFAULT_EOS_BINARY));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let opts = ClientOptions::new("root://x").with_timeout_secs(0);
        assert_eq!(opts.timeout(), Duration::from_secs(1));
    }
}
