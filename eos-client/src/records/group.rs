//! `eos group ls -m`

use serde::Serialize;

monitoring_record! {
    /// A scheduling group inside a space
    pub struct GroupRecord {
        name => "name",
        cfg_status => "cfg.status",
        nofs => "nofs",
        avg_stat_disk_load => "avg.stat.disk.load",
        sig_stat_disk_load => "sig.stat.disk.load",
        sum_stat_disk_readratemb => "sum.stat.disk.readratemb",
        sum_stat_disk_writeratemb => "sum.stat.disk.writeratemb",
        sum_stat_net_ethratemib => "sum.stat.net.ethratemib",
        sum_stat_net_inratemib => "sum.stat.net.inratemib",
        sum_stat_net_outratemib => "sum.stat.net.outratemib",
        sum_stat_ropen => "sum.stat.ropen",
        sum_stat_wopen => "sum.stat.wopen",
        sum_stat_statfs_usedbytes => "sum.stat.statfs.usedbytes",
        sum_stat_statfs_freebytes => "sum.stat.statfs.freebytes",
        sum_stat_statfs_capacity => "sum.stat.statfs.capacity",
        sum_stat_usedfiles => "sum.stat.usedfiles",
        sum_stat_statfs_ffree => "sum.stat.statfs.ffree",
        sum_stat_statfs_files => "sum.stat.statfs.files",
        /// Fill-level deviation across the group's filesystems
        dev_stat_statfs_filled => "dev.stat.statfs.filled",
        avg_stat_statfs_filled => "avg.stat.statfs.filled",
        sig_stat_statfs_filled => "sig.stat.statfs.filled",
        cfg_stat_balancing => "cfg.stat.balancing",
        sum_stat_balancer_running => "sum.stat.balancer.running",
        sum_stat_drainer_running => "sum.stat.drainer.running",
    }
}

/// Balancing state reported in `cfg.stat.balancing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalancingState {
    Idle,
    Balancing,
    DrainWait,
    Unknown,
}

impl BalancingState {
    pub fn parse(value: &str) -> Self {
        match value {
            "idle" => Self::Idle,
            "balancing" => Self::Balancing,
            "drainwait" => Self::DrainWait,
            _ => Self::Unknown,
        }
    }

    /// Gauge encoding: idle=0, balancing=1, drainwait=2, anything else 0
    pub fn gauge(self) -> f64 {
        match self {
            Self::Idle | Self::Unknown => 0.0,
            Self::Balancing => 1.0,
            Self::DrainWait => 2.0,
        }
    }
}

impl GroupRecord {
    pub fn is_enabled(&self) -> bool {
        self.cfg_status == "on"
    }

    /// Gauge encoding of `cfg.status`: on=1, anything else 0
    pub fn cfg_status_gauge(&self) -> f64 {
        if self.is_enabled() {
            1.0
        } else {
            0.0
        }
    }

    pub fn balancing(&self) -> BalancingState {
        BalancingState::parse(&self.cfg_stat_balancing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::MonitoringLine;
    use crate::records::FromMonitoring;

    #[test]
    fn test_partial_mapping_leaves_other_fields_empty() {
        let line: MonitoringLine = [("name", "default"), ("cfg.status", "on"), ("nofs", "4")]
            .into_iter()
            .collect();
        let group = GroupRecord::from_monitoring(&line);

        let expected = GroupRecord {
            name: "default".into(),
            cfg_status: "on".into(),
            nofs: "4".into(),
            ..GroupRecord::default()
        };
        assert_eq!(group, expected);
        assert!(group.is_enabled());
    }

    #[test]
    fn test_group_status_encodings() {
        let group = GroupRecord::from_line(
            "name=default.3 cfg.status=off cfg.stat.balancing=drainwait dev.stat.statfs.filled=1.5",
        );
        assert_eq!(group.cfg_status_gauge(), 0.0);
        assert_eq!(group.balancing(), BalancingState::DrainWait);
        assert_eq!(group.balancing().gauge(), 2.0);
        assert_eq!(group.dev_stat_statfs_filled, "1.5");
    }

    #[test]
    fn test_balancing_state_parse() {
        assert_eq!(BalancingState::parse("idle").gauge(), 0.0);
        assert_eq!(BalancingState::parse("balancing").gauge(), 1.0);
        assert_eq!(BalancingState::parse(""), BalancingState::Unknown);
        assert_eq!(BalancingState::parse("something-new").gauge(), 0.0);
    }
}
