//! Canned admin tool answers
//!
//! Shaped after real `-m` output of a small two-node instance.

use serde_json::{json, Value};

pub const MGM_URL: &str = "root://eos-mgm.example.org";

pub const NODE_LS_M: &str = "\
type=nodesview hostport=fst01.example.org:1095 status=online cfg.status=on cfg.txgw=off heartbeatdelta=1 nofs=2 sum.stat.statfs.freebytes=7000000000000 sum.stat.statfs.usedbytes=3000000000000 sum.stat.statfs.capacity=10000000000000 sum.stat.statfs.ffree=400000000 sum.stat.usedfiles=1200345 sum.stat.statfs.files=401200345 sum.stat.ropen=12 sum.stat.wopen=3 cfg.stat.sys.threads=410 sum.stat.net.inratemib=120.5 sum.stat.net.outratemib=88.25
type=nodesview hostport=fst02.example.org:1095 status=offline cfg.status=on cfg.txgw=off heartbeatdelta=3600 nofs=0 sum.stat.statfs.freebytes=0 sum.stat.statfs.usedbytes=0 sum.stat.statfs.capacity=0 sum.stat.statfs.ffree=0 sum.stat.usedfiles=0 sum.stat.statfs.files=0 sum.stat.ropen=0 sum.stat.wopen=0 cfg.stat.sys.threads=0 sum.stat.net.inratemib=0 sum.stat.net.outratemib=0
";

pub const SPACE_LS_M: &str = "\
type=spaceview name=default cfg.groupsize=2 cfg.groupmod=24 nofs=2 avg.stat.disk.load=0.07 sig.stat.disk.load=0.01 sum.stat.disk.readratemb=15 sum.stat.disk.writeratemb=4 sum.stat.net.ethratemib=1192 sum.stat.net.inratemib=120.5 sum.stat.net.outratemib=88.25 sum.stat.ropen=12 sum.stat.wopen=3 sum.stat.statfs.usedbytes=3000000000000 sum.stat.statfs.freebytes=7000000000000 sum.stat.statfs.capacity=10000000000000 sum.stat.usedfiles=1200345 sum.stat.statfs.ffiles=400000000 sum.stat.statfs.files=401200345 sum.stat.statfs.capacity?configstatus@rw=10000000000000 sum.<n>?configstatus@rw=2 cfg.quota=on cfg.nominalsize=10000000000000 cfg.balancer=off cfg.balancer.threshold=20 sum.stat.balancer.running=0 sum.stat.drainer.running=0 sum.stat.disk.iops?configstatus@rw=240 sum.stat.disk.bw?configstatus@rw=500
";

pub const GROUP_LS_M: &str = "\
type=groupview name=default.0 cfg.status=on nofs=1 avg.stat.disk.load=0.05 sig.stat.disk.load=0 sum.stat.disk.readratemb=10 sum.stat.disk.writeratemb=2 sum.stat.net.ethratemib=596 sum.stat.net.inratemib=60 sum.stat.net.outratemib=44 sum.stat.ropen=6 sum.stat.wopen=1 sum.stat.statfs.usedbytes=1500000000000 sum.stat.statfs.freebytes=3500000000000 sum.stat.statfs.capacity=5000000000000 sum.stat.usedfiles=600000 sum.stat.statfs.ffree=200000000 sum.stat.statfs.files=200600000 dev.stat.statfs.filled=0 avg.stat.statfs.filled=30 sig.stat.statfs.filled=0 cfg.stat.balancing=idle sum.stat.balancer.running=0 sum.stat.drainer.running=0
type=groupview name=default.1 cfg.status=off nofs=1 avg.stat.disk.load=0.09 sig.stat.disk.load=0 sum.stat.disk.readratemb=5 sum.stat.disk.writeratemb=2 sum.stat.net.ethratemib=596 sum.stat.net.inratemib=60.5 sum.stat.net.outratemib=44.25 sum.stat.ropen=6 sum.stat.wopen=2 sum.stat.statfs.usedbytes=1500000000000 sum.stat.statfs.freebytes=3500000000000 sum.stat.statfs.capacity=5000000000000 sum.stat.usedfiles=600345 sum.stat.statfs.ffree=200000000 sum.stat.statfs.files=200600345 dev.stat.statfs.filled=0 avg.stat.statfs.filled=30 sig.stat.statfs.filled=0 cfg.stat.balancing=drainwait sum.stat.balancer.running=0 sum.stat.drainer.running=1
";

pub const FS_LS_M: &str = "\
host=fst01.example.org port=1095 id=1 uuid=3a1c2f1e-0001 path=/data01 schedgroup=default.0 stat.boot=booted configstatus=rw headroom=25000000000 stat.errc=0 stat.errmsg= stat.disk.load=0.05 stat.disk.readratemb=10 stat.disk.writeratemb=2 stat.net.ethratemib=1192 stat.net.inratemib=60 stat.net.outratemib=44 stat.ropen=6 stat.wopen=1 stat.statfs.freebytes=3500000000000 stat.statfs.usedbytes=1500000000000 stat.statfs.capacity=5000000000000 stat.usedfiles=600000 stat.statfs.ffree=200000000 stat.statfs.fused=1500000000000 stat.statfs.files=200600000 drainstatus=nodrain stat.drainprogress=0 stat.drainfiles=0 stat.drainbytesleft=0 stat.drainretry=0 stat.drain.failed=0 graceperiod=86400 stat.timeleft=0 stat.active=online stat.balancer.running=0 stat.drainer.running=0 stat.disk.iops=120 stat.disk.bw=250 stat.geotag=site::rack1 stat.health=OK stat.health.redundancy_factor=1 stat.health.drives_failed=0 stat.health.drives_total=12 stat.health.indicator=N/A
host=fst01.example.org port=1095 id=2 uuid=3a1c2f1e-0002 path=/data02 schedgroup=default.1 stat.boot=booted configstatus=drain headroom=25000000000 stat.errc=5 stat.errmsg=\"Input/output error\" stat.disk.load=0.09 stat.disk.readratemb=5 stat.disk.writeratemb=2 stat.net.ethratemib=1192 stat.net.inratemib=60.5 stat.net.outratemib=44.25 stat.ropen=6 stat.wopen=2 stat.statfs.freebytes=3500000000000 stat.statfs.usedbytes=1500000000000 stat.statfs.capacity=5000000000000 stat.usedfiles=600345 stat.statfs.ffree=200000000 stat.statfs.fused=1500000000000 stat.statfs.files=200600345 drainstatus=draining stat.drainprogress=42 stat.drainfiles=348199 stat.drainbytesleft=870000000000 stat.drainretry=1 stat.drain.failed=3 graceperiod=86400 stat.timeleft=50211 stat.active=online stat.balancer.running=0 stat.drainer.running=1 stat.disk.iops=120 stat.disk.bw=250 stat.geotag=site::rack1 stat.health=OK stat.health.redundancy_factor=1 stat.health.drives_failed=0 stat.health.drives_total=12 stat.health.indicator=N/A
";

pub const NS_STAT_A_M: &str = "\
uid=all gid=all ns.total.files=1523446
uid=all gid=all ns.total.directories=20331
uid=all gid=all ns.uptime=864000
uid=all gid=all ns.boot.status=booted
uid=all gid=all ns.memory.virtual=8123400192
uid=all gid=all cmd=Access total=12 5s=0.00 60s=0.00 300s=0.00 3600s=0.00 exec=0.01 execsig=0.00 exec99=0.02 execmax=0.03
uid=all gid=all cmd=Stat total=99211 5s=10.20 60s=9.80 300s=9.50 3600s=9.01 exec=0.04 execsig=0.01 exec99=0.20 execmax=1.30
uid=all gid=all cmd=Open total=5021 5s=1.40 60s=1.10 300s=0.90 3600s=0.85 exec=0.30 execsig=0.05 exec99=0.90 execmax=4.10
uid=1000 gid=all cmd=Stat total=15 5s=1.00 60s=0.50 300s=0.10 3600s=0.01
uid=all gid=1000 ns.total.files=14
";

pub const VERSION: &str = "\
EOS_INSTANCE=eosdev
EOS_SERVER_VERSION=5.2.8 EOS_SERVER_RELEASE=1
EOS_CLIENT_VERSION=5.2.7 EOS_CLIENT_RELEASE=1
";

/// Version the [`VERSION`] fixture reports for the MGM
pub const SERVER_VERSION: &str = "5.2.8";

/// `eos --json node ls` for the two nodes of [`NODE_LS_M`]
pub fn node_ls_json() -> Value {
    json!({
        "errormsg": "",
        "retc": "0",
        "result": [
            node_entry("fst01.example.org:1095", "%2010:42:01%20up%2017%20days,%20%203:02,%20%200%20users"),
            node_entry("fst02.example.org:1095", "%2010:42:01%20up%2042%20min,%20%200%20users"),
        ]
    })
}

fn node_entry(hostport: &str, uptime: &str) -> Value {
    json!({
        "hostport": hostport,
        "status": "online",
        "cfg": {
            "stat": {
                "geotag": "site::rack1",
                "sys": {
                    "eos": {"start": "Mon Oct  5 08:00:00 2026", "version": "5.2.8-1"},
                    "kernel": "5.14.0-362.el9.x86_64",
                    "rss": 2147483648u64,
                    "sockets": 512,
                    "threads": 410,
                    "uptime": uptime,
                    "vsize": 4294967296u64,
                    "xrootd": {"version": "v5.6.2"}
                }
            }
        }
    })
}
