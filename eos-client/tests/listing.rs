//! Listings against the fake admin tool from `eos-devkit`

use eos_client::{ClientOptions, EosClient, EosError};
use eos_devkit::{fixtures, Response, TestHarness};
use std::time::{Duration, Instant};

fn client(harness: &TestHarness, timeout_secs: u64) -> EosClient {
    EosClient::new(
        ClientOptions::new(fixtures::MGM_URL)
            .with_binary(harness.binary())
            .with_timeout_secs(timeout_secs),
    )
}

#[tokio::test]
async fn test_list_nodes_as_root() {
    let harness = TestHarness::new().unwrap();
    let nodes = client(&harness, 5).list_nodes("root").await.unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].hostport, "fst01.example.org:1095");
    assert_eq!(nodes[0].status, "online");
    assert_eq!(nodes[0].sum_stat_statfs_total, "10000000000000");
    assert_eq!(nodes[0].cfg_stat_sys_threads, "410");
    assert_eq!(nodes[1].hostport, "fst02.example.org:1095");
    assert_eq!(nodes[1].status, "offline");

    harness.assert_invocations(&["-r 0 0 node ls -m"]).unwrap();
    harness.assert_clean_environment(fixtures::MGM_URL).unwrap();
}

#[tokio::test]
async fn test_list_spaces_groups_and_filesystems() {
    let harness = TestHarness::new().unwrap();
    let client = client(&harness, 5);

    let spaces = client.list_spaces("root").await.unwrap();
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0].name, "default");
    assert_eq!(spaces[0].space_type, "spaceview");
    assert_eq!(spaces[0].sum_nofs_configstatus_rw, "2");
    assert!(spaces[0].quota_enabled());

    let groups = client.list_groups("root").await.unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["default.0", "default.1"]);
    assert_eq!(groups[0].cfg_status_gauge(), 1.0);
    assert_eq!(groups[1].balancing().gauge(), 2.0);

    let filesystems = client.list_filesystems("root").await.unwrap();
    assert_eq!(filesystems.len(), 2);
    assert_eq!(filesystems[1].id, "2");
    assert_eq!(filesystems[1].stat_errmsg, "Input/output error");
    assert_eq!(filesystems[1].drainstatus, "draining");
    assert_eq!(filesystems[0].stat_errmsg, "");

    harness
        .assert_invocations(&["-r 0 0 space ls -m", "-r 0 0 group ls -m", "-r 0 0 fs ls -m"])
        .unwrap();
}

#[tokio::test]
async fn test_empty_output_is_empty_listing() {
    let harness = TestHarness::with_routes(|builder| {
        builder.route("group ls -m", Response::stdout("\n  \n"))
    })
    .unwrap();
    let groups = client(&harness, 5).list_groups("root").await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_exit_code_two_is_not_found() {
    let harness = TestHarness::with_routes(|builder| {
        builder.route("fs ls -m", Response::failure(2, "error: no such filesystem"))
    })
    .unwrap();
    let err = client(&harness, 5).list_filesystems("root").await.unwrap_err();
    assert!(matches!(err, EosError::NotFound { ref stderr } if stderr.contains("no such filesystem")));
}

#[tokio::test]
async fn test_other_failure_carries_exit_code() {
    let harness = TestHarness::with_routes(|builder| {
        builder.route("space ls -m", Response::failure(13, "permission denied"))
    })
    .unwrap();
    let err = client(&harness, 5).list_spaces("root").await.unwrap_err();
    match err {
        EosError::CommandFailed { code, stderr } => {
            assert_eq!(code, Some(13));
            assert_eq!(stderr, "permission denied");
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_command_times_out() {
    let harness = TestHarness::with_routes(|builder| {
        builder.route(
            "node ls -m",
            Response::stdout(fixtures::NODE_LS_M).with_delay_secs(20),
        )
    })
    .unwrap();

    let started = Instant::now();
    let err = client(&harness, 1).list_nodes("root").await.unwrap_err();
    assert!(matches!(err, EosError::Timeout(_)));
    assert!(err.is_retryable());
    assert!(started.elapsed() < Duration::from_secs(8));
}

#[tokio::test]
async fn test_unknown_user_never_runs_the_tool() {
    let harness = TestHarness::new().unwrap();
    let err = client(&harness, 5)
        .list_nodes("no-such-user-eos-client")
        .await
        .unwrap_err();
    assert!(matches!(err, EosError::UnknownUser(_)));
    assert!(harness.invocations().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_versions() {
    let harness = TestHarness::new().unwrap();
    let versions = client(&harness, 5).list_versions().await.unwrap();

    assert_eq!(versions.len(), 2);
    assert!(versions.iter().all(|v| v.eos_mgm == fixtures::SERVER_VERSION));
    assert_eq!(versions[0].hostname, "fst01.example.org");
    assert_eq!(versions[0].port, "1095");
    assert_eq!(versions[0].geotag, "site::rack1");
    assert_eq!(versions[0].eos_fst, "5.2.8-1");
    assert_eq!(versions[0].xrootd_fst, "v5.6.2");
    assert_eq!(versions[0].uptime, "17");
    // "up 42 min" has no day count
    assert_eq!(versions[1].uptime, "0");

    harness.assert_invocations(&["version", "--json node ls"]).unwrap();
    harness.assert_clean_environment(fixtures::MGM_URL).unwrap();
}

#[tokio::test]
async fn test_versions_fail_when_either_call_fails() {
    let harness = TestHarness::with_routes(|builder| {
        builder.route("--json node ls", Response::failure(1, "broken"))
    })
    .unwrap();
    let err = client(&harness, 5).list_versions().await.unwrap_err();
    assert!(matches!(err, EosError::CommandFailed { code: Some(1), .. }));

    let harness = TestHarness::with_routes(|builder| {
        builder.route("version", Response::stdout("EOS_CLIENT_VERSION=5.2.7\n"))
    })
    .unwrap();
    let err = client(&harness, 5).list_versions().await.unwrap_err();
    assert!(matches!(err, EosError::Protocol(_)));
    harness.assert_invocations(&["version"]).unwrap();
}

#[tokio::test]
async fn test_versions_errormsg_is_protocol_error() {
    let harness = TestHarness::with_routes(|builder| {
        builder.route(
            "--json node ls",
            Response::stdout(r#"{"errormsg": "no nodes configured", "result": null}"#),
        )
    })
    .unwrap();
    let err = client(&harness, 5).list_versions().await.unwrap_err();
    assert!(matches!(err, EosError::Protocol(ref msg) if msg == "no nodes configured"));
}

#[tokio::test]
async fn test_list_namespace() {
    let harness = TestHarness::new().unwrap();
    let snapshot = client(&harness, 5).list_namespace().await.unwrap();

    assert_eq!(snapshot.stats.len(), 5);
    let merged = snapshot.merged_stats();
    assert_eq!(merged.total_files, "1523446");
    assert_eq!(merged.total_directories, "20331");
    assert_eq!(merged.memory_virtual, "8123400192");

    let operations: Vec<&str> = snapshot.activity.iter().map(|a| a.operation.as_str()).collect();
    assert_eq!(operations, ["Stat", "Open"]);
    assert_eq!(snapshot.activity[1].max, "4.10");

    // namespace queries run without impersonation
    harness.assert_invocations(&["ns stat -a -m"]).unwrap();
}
