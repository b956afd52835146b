//! Software versions per node, from `eos --json node ls` and `eos version`

use crate::error::{EosError, Result};
use crate::monitoring::{self, MonitoringLine};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

const SERVER_VERSION_KEY: &str = "EOS_SERVER_VERSION";
const UP_MARKER: &str = "up%20";
const DAY_MARKER: &str = "%20day";

/// Version report for one FST
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    /// Version of the MGM answering the query
    pub eos_mgm: String,
    pub hostname: String,
    pub port: String,
    pub geotag: String,
    pub vsize: String,
    pub rss: String,
    pub threads: String,
    pub sockets: String,
    pub eos_fst: String,
    pub xrootd_fst: String,
    pub kernel: String,
    pub start: String,
    /// Whole days of host uptime, "0" when the uptime string is not understood
    pub uptime: String,
}

impl VersionRecord {
    pub fn from_node(eos_mgm: &str, node: &NodeListEntry) -> Self {
        let (hostname, port) = split_hostport(&node.hostport);
        let stat = node.cfg.stat.clone();
        let sys = stat.sys;
        Self {
            eos_mgm: eos_mgm.to_string(),
            hostname: hostname.to_string(),
            port: port.to_string(),
            geotag: stat.geotag,
            vsize: sys.vsize.to_string(),
            rss: sys.rss.to_string(),
            threads: sys.threads.to_string(),
            sockets: sys.sockets.to_string(),
            eos_fst: sys.eos.version,
            xrootd_fst: sys.xrootd.version,
            kernel: sys.kernel,
            start: sys.eos.start,
            uptime: parse_uptime(&sys.uptime),
        }
    }
}

/// Top level of `eos --json node ls`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeListResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub errormsg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result: Vec<NodeListEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeListEntry {
    /// "hostname:port"
    #[serde(deserialize_with = "null_as_default")]
    pub hostport: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cfg: NodeCfg,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeCfg {
    #[serde(deserialize_with = "null_as_default")]
    pub stat: NodeStat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeStat {
    #[serde(deserialize_with = "null_as_default")]
    pub geotag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sys: NodeSys,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeSys {
    #[serde(deserialize_with = "null_as_default")]
    pub eos: ComponentInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub kernel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rss: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sockets: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub threads: i64,
    /// URL-encoded output of `uptime`
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vsize: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub xrootd: ComponentInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode `eos --json node ls` into one record per node, in document order
pub fn parse_versions(eos_mgm: &str, json: &str) -> Result<Vec<VersionRecord>> {
    let response: NodeListResponse = serde_json::from_str(json)?;
    if !response.errormsg.is_empty() {
        return Err(EosError::Protocol(response.errormsg));
    }
    Ok(response
        .result
        .iter()
        .map(|node| VersionRecord::from_node(eos_mgm, node))
        .collect())
}

/// Extract the MGM version from `eos version`
pub fn parse_server_version(raw: &str) -> Result<String> {
    monitoring::records(raw)
        .map(MonitoringLine::parse)
        .find_map(|line| line.get(SERVER_VERSION_KEY).map(str::to_string))
        .ok_or_else(|| EosError::Protocol("EOS server version not found".to_string()))
}

/// Split "host:port"; a missing port yields an empty one
pub fn split_hostport(hostport: &str) -> (&str, &str) {
    hostport.rsplit_once(':').unwrap_or((hostport, ""))
}

/// Days of uptime from an URL-encoded `uptime` line (`... up%2010%20days, ...`)
pub fn parse_uptime(raw: &str) -> String {
    let days = raw
        .split_once(UP_MARKER)
        .and_then(|(_, rest)| rest.split_once(DAY_MARKER))
        .map(|(days, _)| days)
        .filter(|days| !days.is_empty() && days.chars().all(|c| c.is_ascii_digit()));

    match days {
        Some(days) => days.to_string(),
        None => {
            warn!("Wrong uptime: {:?}", raw);
            "0".to_string()
        }
    }
}
