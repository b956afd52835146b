//! `eos ns stat -a -m`
//!
//! The output mixes three kinds of rows:
//! - global statistic rows: `uid=all gid=all ns.<metric>=<value>`
//! - global activity rows: `uid=all gid=all cmd=<op> total=.. 5s=.. ...`
//! - per-user / per-group breakdowns, which are ignored
//!
//! A statistic row is recognised by having no `cmd` and at most three keys
//! (`uid`, `gid` and one metric). That threshold follows the layout of the
//! tool's global rows; a new layout needs a new rule here.

use super::{gauge, FromMonitoring};
use crate::monitoring::{self, MonitoringLine};
use serde::Serialize;
use tracing::warn;

/// Wildcard marking a row aggregated over every user or group
pub const ALL: &str = "all";

const MAX_STATISTIC_KEYS: usize = 3;
const RATE_KEYS: [&str; 4] = ["5s", "60s", "300s", "3600s"];
/// Rate the tool prints for an operation without recent calls
const IDLE_RATE: &str = "0.00";

monitoring_record! {
    /// Namespace statistics. Each global row fills one field; see
    /// [`NamespaceSnapshot::merged_stats`] for the combined view.
    pub struct NamespaceRecord {
        boot_file_time => "ns.boot.file.time",
        boot_status => "ns.boot.status",
        boot_time => "ns.boot.time",
        cache_container_maxsize => "ns.cache.containers.maxsize",
        cache_container_occupancy => "ns.cache.containers.occupancy",
        cache_files_maxsize => "ns.cache.files.maxsize",
        cache_files_occupancy => "ns.cache.files.occupancy",
        fds_all => "ns.fds.all",
        fusex_activeclients => "ns.fusex.activeclients",
        fusex_caps => "ns.fusex.caps",
        fusex_clients => "ns.fusex.clients",
        fusex_lockedclients => "ns.fusex.lockedclients",
        latency_dirs => "ns.latency.dirs",
        latency_files => "ns.latency.files",
        latency_pending_updates => "ns.latency.pending.updates",
        latencypeak_eosviewmutex_1min => "ns.latencypeak.eosviewmutex.1min",
        latencypeak_eosviewmutex_2min => "ns.latencypeak.eosviewmutex.2min",
        latencypeak_eosviewmutex_5min => "ns.latencypeak.eosviewmutex.5min",
        latencypeak_eosviewmutex_last => "ns.latencypeak.eosviewmutex.last",
        memory_growth => "ns.memory.growth",
        memory_resident => "ns.memory.resident",
        memory_share => "ns.memory.share",
        memory_virtual => "ns.memory.virtual",
        stat_threads => "ns.stat.threads",
        total_directories => "ns.total.directories",
        total_directories_changelog_avg_entry_size => "ns.total.directories.changelog.avg_entry_size",
        total_directories_changelog_size => "ns.total.directories.changelog.size",
        total_files => "ns.total.files",
        total_files_changelog_avg_entry_size => "ns.total.files.changelog.avg_entry_size",
        total_files_changelog_size => "ns.total.files.changelog.size",
        uptime => "ns.uptime",
    }
}

monitoring_record! {
    /// Throughput of one namespace operation, all users and groups
    pub struct NamespaceActivityRecord {
        user => "uid",
        gid => "gid",
        operation => "cmd",
        sum => "total",
        last_5s => "5s",
        last_60s => "60s",
        last_300s => "300s",
        last_3600s => "3600s",
        exec => "exec",
        sigma => "execsig",
        exec99 => "exec99",
        max => "execmax",
    }
}

/// Records produced by one `ns stat` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceSnapshot {
    pub stats: Vec<NamespaceRecord>,
    pub activity: Vec<NamespaceActivityRecord>,
}

impl NamespaceSnapshot {
    /// Single statistics record, later rows overriding earlier ones
    pub fn merged_stats(&self) -> NamespaceRecord {
        let line: MonitoringLine = self
            .stats
            .iter()
            .flat_map(|record| record.fields())
            .filter(|(_, value)| !value.is_empty())
            .collect();
        NamespaceRecord::from_monitoring(&line)
    }
}

/// What one `ns stat` row turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceRow {
    Statistic(NamespaceRecord),
    Activity(NamespaceActivityRecord),
}

/// Whether the row aggregates every user and group
pub fn is_global_rollup(line: &MonitoringLine) -> bool {
    line.get("uid") == Some(ALL) && line.get("gid") == Some(ALL)
}

/// Classify one row and project it, `None` for rows that are not exported
pub fn project_row(line: &MonitoringLine) -> Option<NamespaceRow> {
    if !is_global_rollup(line) {
        return None;
    }

    if line.contains_key("cmd") {
        let idle = RATE_KEYS.iter().all(|key| line.get(key) == Some(IDLE_RATE));
        if idle {
            return None;
        }
        return Some(NamespaceRow::Activity(
            NamespaceActivityRecord::from_monitoring(line),
        ));
    }

    if line.len() > MAX_STATISTIC_KEYS {
        return None;
    }

    let mut metrics = line
        .iter()
        .filter(|(key, _)| *key != "uid" && *key != "gid")
        .peekable();
    metrics.peek()?;
    for (key, value) in metrics {
        if gauge(value).is_none() {
            warn!("Value of '{}': '{}' is not a number", key, value);
        }
    }

    Some(NamespaceRow::Statistic(NamespaceRecord::from_monitoring(line)))
}

/// Project the whole `ns stat -a -m` output, preserving row order
pub fn parse_namespace(raw: &str) -> NamespaceSnapshot {
    let mut snapshot = NamespaceSnapshot::default();
    for row in monitoring::records(raw) {
        match project_row(&MonitoringLine::parse(row)) {
            Some(NamespaceRow::Statistic(record)) => snapshot.stats.push(record),
            Some(NamespaceRow::Activity(record)) => snapshot.activity.push(record),
            None => {}
        }
    }
    snapshot
}
