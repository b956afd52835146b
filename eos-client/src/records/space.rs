//! `eos space ls -m`

monitoring_record! {
    /// A space: named pool of filesystems with its group layout, quota and
    /// balancer configuration
    pub struct SpaceRecord {
        space_type => "type",
        name => "name",
        cfg_group_size => "cfg.groupsize",
        cfg_group_mod => "cfg.groupmod",
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
        sum_stat_statfs_ffiles => "sum.stat.statfs.ffiles",
        sum_stat_statfs_files => "sum.stat.statfs.files",
        sum_stat_statfs_capacity_configstatus_rw => "sum.stat.statfs.capacity?configstatus@rw",
        sum_nofs_configstatus_rw => "sum.<n>?configstatus@rw",
        cfg_quota => "cfg.quota",
        cfg_nominalsize => "cfg.nominalsize",
        cfg_balancer => "cfg.balancer",
        cfg_balancer_threshold => "cfg.balancer.threshold",
        sum_stat_balancer_running => "sum.stat.balancer.running",
        sum_stat_drainer_running => "sum.stat.drainer.running",
        sum_stat_disk_iops_configstatus_rw => "sum.stat.disk.iops?configstatus@rw",
        sum_stat_disk_bw_configstatus_rw => "sum.stat.disk.bw?configstatus@rw",
    }
}

impl SpaceRecord {
    pub fn quota_enabled(&self) -> bool {
        self.cfg_quota == "on"
    }

    pub fn balancer_enabled(&self) -> bool {
        self.cfg_balancer == "on"
    }
}
