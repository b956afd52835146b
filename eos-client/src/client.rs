//! Entity listers
//!
//! One call per entity kind: run the admin tool, split its answer into
//! lines and project every line, keeping the tool's order. A failing
//! command aborts the listing; a strange line never does.

use crate::config::ClientOptions;
use crate::error::Result;
use crate::execution::CommandExecutor;
use crate::records::namespace::{parse_namespace, NamespaceSnapshot};
use crate::records::version::{parse_server_version, parse_versions};
use crate::records::{
    parse_records, FromMonitoring, FsRecord, GroupRecord, NodeRecord, SpaceRecord, VersionRecord,
};
use tracing::debug;

pub const NODE_LS: &[&str] = &["node", "ls", "-m"];
pub const SPACE_LS: &[&str] = &["space", "ls", "-m"];
pub const GROUP_LS: &[&str] = &["group", "ls", "-m"];
pub const FS_LS: &[&str] = &["fs", "ls", "-m"];
pub const NS_STAT: &[&str] = &["ns", "stat", "-a", "-m"];
pub const NODE_LS_JSON: &[&str] = &["--json", "node", "ls"];
pub const VERSION: &[&str] = &["version"];

/// Client performing read-only queries against an EOS MGM through `eos`
#[derive(Debug, Clone)]
pub struct EosClient {
    executor: CommandExecutor,
}

impl EosClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            executor: CommandExecutor::new(options),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        self.executor.options()
    }

    /// List the FST nodes, running the tool as `username`
    pub async fn list_nodes(&self, username: &str) -> Result<Vec<NodeRecord>> {
        self.list_monitoring(NODE_LS, Some(username)).await
    }

    /// List the spaces, running the tool as `username`
    pub async fn list_spaces(&self, username: &str) -> Result<Vec<SpaceRecord>> {
        self.list_monitoring(SPACE_LS, Some(username)).await
    }

    /// List the scheduling groups, running the tool as `username`
    pub async fn list_groups(&self, username: &str) -> Result<Vec<GroupRecord>> {
        self.list_monitoring(GROUP_LS, Some(username)).await
    }

    /// List the filesystems, running the tool as `username`
    pub async fn list_filesystems(&self, username: &str) -> Result<Vec<FsRecord>> {
        self.list_monitoring(FS_LS, Some(username)).await
    }

    /// Version report of every node, tagged with the MGM version
    ///
    /// Both underlying calls share one deadline.
    pub async fn list_versions(&self) -> Result<Vec<VersionRecord>> {
        let deadline = self.executor.deadline();
        let binary = &self.options().binary;

        let version_out = self
            .executor
            .execute(binary, VERSION, None, deadline)
            .await?
            .into_stdout()?;
        let eos_mgm = parse_server_version(&version_out)?;
        debug!("MGM version: {}", eos_mgm);

        let json = self
            .executor
            .execute(binary, NODE_LS_JSON, None, deadline)
            .await?
            .into_stdout()?;
        let records = parse_versions(&eos_mgm, &json)?;
        debug!("Parsed {} version records", records.len());
        Ok(records)
    }

    /// Global namespace statistics and per-operation activity
    pub async fn list_namespace(&self) -> Result<NamespaceSnapshot> {
        let stdout = self.executor.execute_eos(NS_STAT, None).await?.into_stdout()?;
        let snapshot = parse_namespace(&stdout);
        debug!(
            "Parsed {} namespace statistics and {} activity records",
            snapshot.stats.len(),
            snapshot.activity.len()
        );
        Ok(snapshot)
    }

    async fn list_monitoring<T: FromMonitoring>(
        &self,
        args: &[&str],
        identity: Option<&str>,
    ) -> Result<Vec<T>> {
        let stdout = self.executor.execute_eos(args, identity).await?.into_stdout()?;
        let records = parse_records::<T>(&stdout);
        debug!("Parsed {} records from `eos {}`", records.len(), args.join(" "));
        Ok(records)
    }
}
