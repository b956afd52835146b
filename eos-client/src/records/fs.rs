//! `eos fs ls -m`

monitoring_record! {
    /// One filesystem as seen by the MGM
    pub struct FsRecord {
        host => "host",
        port => "port",
        id => "id",
        uuid => "uuid",
        path => "path",
        schedgroup => "schedgroup",
        stat_boot => "stat.boot",
        configstatus => "configstatus",
        headroom => "headroom",
        stat_errc => "stat.errc",
        stat_errmsg => "stat.errmsg",
        stat_disk_load => "stat.disk.load",
        stat_disk_readratemb => "stat.disk.readratemb",
        stat_disk_writeratemb => "stat.disk.writeratemb",
        stat_net_ethratemib => "stat.net.ethratemib",
        stat_net_inratemib => "stat.net.inratemib",
        stat_net_outratemib => "stat.net.outratemib",
        stat_ropen => "stat.ropen",
        stat_wopen => "stat.wopen",
        stat_statfs_freebytes => "stat.statfs.freebytes",
        stat_statfs_usedbytes => "stat.statfs.usedbytes",
        stat_statfs_capacity => "stat.statfs.capacity",
        stat_usedfiles => "stat.usedfiles",
        stat_statfs_ffree => "stat.statfs.ffree",
        stat_statfs_fused => "stat.statfs.fused",
        stat_statfs_files => "stat.statfs.files",
        drainstatus => "drainstatus",
        stat_drainprogress => "stat.drainprogress",
        stat_drainfiles => "stat.drainfiles",
        stat_drainbytesleft => "stat.drainbytesleft",
        stat_drainretry => "stat.drainretry",
        stat_drain_failed => "stat.drain.failed",
        graceperiod => "graceperiod",
        stat_timeleft => "stat.timeleft",
        stat_active => "stat.active",
        stat_balancer_running => "stat.balancer.running",
        stat_drainer_running => "stat.drainer.running",
        stat_disk_iops => "stat.disk.iops",
        stat_disk_bw => "stat.disk.bw",
        stat_geotag => "stat.geotag",
        stat_health => "stat.health",
        stat_health_redundancy_factor => "stat.health.redundancy_factor",
        stat_health_drives_failed => "stat.health.drives_failed",
        stat_health_drives_total => "stat.health.drives_total",
        stat_health_indicator => "stat.health.indicator",
    }
}

impl FsRecord {
    /// `host:port` of the FST serving this filesystem
    pub fn hostport(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::FromMonitoring;

    #[test]
    fn test_fs_projection() {
        let fs = FsRecord::from_line(
            "host=fst01.cern.ch port=1095 id=17 uuid=7d6c1b9e-4c1b-4c5f-9c1e-2c3d4e5f6a7b \
             path=/data17 schedgroup=default.3 stat.boot=booted configstatus=rw \
             stat.errmsg=\"read only file system\" drainstatus=nodrain stat.drain.failed=0 \
             stat.health=OK stat.health.redundancy_factor=2 stat.health.indicator=N/A",
        );
        assert_eq!(fs.hostport(), "fst01.cern.ch:1095");
        assert_eq!(fs.id, "17");
        assert_eq!(fs.path, "/data17");
        assert_eq!(fs.schedgroup, "default.3");
        assert_eq!(fs.stat_boot, "booted");
        assert_eq!(fs.stat_errmsg, "read only file system");
        assert_eq!(fs.drainstatus, "nodrain");
        assert_eq!(fs.stat_drain_failed, "0");
        assert_eq!(fs.stat_health_redundancy_factor, "2");
        assert_eq!(fs.stat_health_indicator, "N/A");
        assert_eq!(fs.stat_drainprogress, "");
    }
}
