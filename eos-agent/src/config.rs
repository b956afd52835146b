//! Agent configuration
//!
//! Handles:
//! - Client options (`[eos]`): binary, MGM URL, timeout, command logging
//! - Collection settings (`[agent]`): cluster label, identity, interval
//! - Config file lookup (`EOS_AGENT_CONFIG`, else `./eos-agent.toml`)

use anyhow::{Context, Result};
use eos_client::ClientOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV_VAR: &str = "EOS_AGENT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "eos-agent.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub eos: ClientOptions,
    pub agent: CollectorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Label copied into every report
    pub cluster: String,
    /// Unix user the tool impersonates for node/space/group/fs listings
    pub username: String,
    pub interval_secs: u64,
    /// Collect once and exit
    pub one_shot: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            cluster: "eos".to_string(),
            username: "root".to_string(),
            interval_secs: 60,
            one_shot: false,
        }
    }
}

impl CollectorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl AgentConfig {
    /// Load from the configured location, defaults when the file is absent
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AgentConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn config_file_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
