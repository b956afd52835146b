//! `eos node ls -m`

monitoring_record! {
    /// One FST node
    pub struct NodeRecord {
        hostport => "hostport",
        status => "status",
        nofs => "nofs",
        sum_stat_statfs_free => "sum.stat.statfs.freebytes",
        sum_stat_statfs_used => "sum.stat.statfs.usedbytes",
        sum_stat_statfs_total => "sum.stat.statfs.capacity",
        sum_stat_stat_files_free => "sum.stat.statfs.ffree",
        sum_stat_stat_files_used => "sum.stat.usedfiles",
        sum_stat_stat_files_total => "sum.stat.statfs.files",
        sum_stat_ropen => "sum.stat.ropen",
        sum_stat_wopen => "sum.stat.wopen",
        cfg_stat_sys_threads => "cfg.stat.sys.threads",
        sum_stat_net_inratemib => "sum.stat.net.inratemib",
        sum_stat_net_outratemib => "sum.stat.net.outratemib",
    }
}
