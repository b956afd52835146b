//! EOS Agent - periodic collector for an EOS cluster
//!
//! Each cycle:
//! - Lists nodes, spaces, groups, filesystems, versions and namespace state concurrently
//! - Logs and skips any listing that fails
//! - Prints one JSON report on stdout

mod config;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use config::AgentConfig;
use eos_client::{
    EosClient, FsRecord, GroupRecord, NamespaceActivityRecord, NamespaceRecord, NodeRecord,
    SpaceRecord, VersionRecord,
};
use serde::Serialize;
use std::io::Write;
use tokio::time::interval;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "eos_agent=info,eos_client=info";

/// Snapshot of the cluster produced by one cycle
#[derive(Debug, Serialize)]
struct Report {
    cluster: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<Vec<NodeRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spaces: Option<Vec<SpaceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<GroupRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filesystems: Option<Vec<FsRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    versions: Option<Vec<VersionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<NamespaceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace_activity: Option<Vec<NamespaceActivityRecord>>,
}

/// Keep the listing on success, log it on failure
fn keep<T>(kind: &str, listing: eos_client::Result<T>) -> Option<T> {
    match listing {
        Ok(records) => Some(records),
        Err(e) => {
            error!("Failed to list {}: {}", kind, e);
            None
        }
    }
}

struct Collector {
    config: AgentConfig,
    client: EosClient,
}

impl Collector {
    fn new(config: AgentConfig) -> Self {
        let client = EosClient::new(config.eos.clone());
        Self { config, client }
    }

    /// Run every listing concurrently and assemble the report
    async fn collect(&self) -> Report {
        let username = self.config.agent.username.as_str();
        let (nodes, spaces, groups, filesystems, versions, namespace) = tokio::join!(
            self.client.list_nodes(username),
            self.client.list_spaces(username),
            self.client.list_groups(username),
            self.client.list_filesystems(username),
            self.client.list_versions(),
            self.client.list_namespace(),
        );

        let namespace = keep("namespace", namespace);
        Report {
            cluster: self.config.agent.cluster.clone(),
            timestamp: Utc::now(),
            nodes: keep("nodes", nodes),
            spaces: keep("spaces", spaces),
            groups: keep("groups", groups),
            filesystems: keep("filesystems", filesystems),
            versions: keep("versions", versions),
            namespace: namespace.as_ref().map(|snapshot| snapshot.merged_stats()),
            namespace_activity: namespace.map(|snapshot| snapshot.activity),
        }
    }

    async fn emit(&self) -> Result<()> {
        let report = self.collect().await;
        let line = serde_json::to_string(&report).context("Failed to serialize report")?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line).context("Failed to write report")?;
        stdout.flush()?;
        debug!("Report for {} written at {}", report.cluster, report.timestamp);
        Ok(())
    }

    async fn run(&self) -> Result<()> {
        if self.config.agent.one_shot {
            return self.emit().await;
        }

        let mut timer = interval(self.config.agent.interval());
        info!("Collecting every {:?}", self.config.agent.interval());
        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if let Err(e) = self.emit().await {
                        error!("Collection cycle failed: {}", e);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping");
                    return Ok(());
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AgentConfig::load().await.context("Failed to load configuration")?;
    if std::env::args().skip(1).any(|arg| arg == "--once") {
        config.agent.one_shot = true;
    }

    info!(
        "EOS agent starting for cluster '{}' ({})",
        config.agent.cluster, config.eos.mgm_url
    );

    Collector::new(config).run().await.context("Agent execution failed")?;
    Ok(())
}
