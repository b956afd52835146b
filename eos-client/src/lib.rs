//! EOS client - typed access to the EOS admin tool
//!
//! Runs `eos` with a controlled environment and deadline, parses its
//! monitoring-format and JSON answers and returns read-only records:
//! - nodes, spaces, scheduling groups, filesystems (`... ls -m`)
//! - per-node software versions (`--json node ls` + `version`)
//! - namespace statistics and activity (`ns stat -a -m`)

pub mod client;
pub mod config;
pub mod error;
pub mod execution;
pub mod monitoring;
pub mod records;

pub use client::EosClient;
pub use config::ClientOptions;
pub use error::{EosError, Result};
pub use execution::{CommandExecutor, ExecutionResult, Identity};
pub use monitoring::{tokenize, MonitoringLine};
pub use records::{
    BalancingState, FromMonitoring, FsRecord, GroupRecord, NamespaceActivityRecord,
    NamespaceRecord, NamespaceSnapshot, NodeRecord, SpaceRecord, VersionRecord,
};
