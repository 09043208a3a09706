// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `azpool start` specs, run against a scripted docker stand-in.

use crate::prelude::*;

#[test]
fn start_without_token_is_usage_error() {
    cli()
        .args(&["start", "--url", "https://dev.azure.com/contoso", "--pool", "linux", "--name", "a"])
        .exits(2)
        .stderr_has("missing access token");
}

#[cfg(unix)]
#[test]
fn start_prints_container_id_of_healthy_agent() {
    let docker = FakeDocker::healthy();

    cli()
        .agent_env()
        .env("AZP_DOCKER_BIN", docker.path())
        .args(&["start"])
        .passes()
        .stdout_eq("c0ffee000001\n");

    let calls = docker.calls();
    assert_eq!(calls.len(), 3, "{:?}", calls);
    assert!(calls[0].starts_with("create"));
    assert!(calls[0].contains("AZP_AGENT_NAME=agent-7"));
    assert_eq!(calls[1], "start c0ffee000001");
    assert_eq!(calls[2], "exec c0ffee000001 ps aux");
}

#[cfg(unix)]
#[test]
fn start_count_launches_numbered_agents() {
    let docker = FakeDocker::healthy();

    let run = cli()
        .agent_env()
        .env("AZP_DOCKER_BIN", docker.path())
        .args(&["start", "--count", "2", "--format", "json"])
        .passes();

    let value: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "name": "agent-7-1", "id": "c0ffee000001" },
            { "name": "agent-7-2", "id": "c0ffee000002" },
        ])
    );
}

#[cfg(unix)]
#[test]
fn start_create_failure_names_the_container() {
    let docker = FakeDocker::new("echo 'Unable to find image azp_agent:latest locally' >&2\nexit 1");

    cli()
        .agent_env()
        .env("AZP_DOCKER_BIN", docker.path())
        .args(&["start"])
        .fails()
        .stderr_has("[agent container agent-7] failed to create agent container")
        .stdout_lacks("c0ffee");
}

#[cfg(unix)]
#[test]
fn start_failure_with_rm_removes_created_container() {
    let docker = FakeDocker::new(
        r#"case "$1" in
  create) echo "deadbeef0001" ;;
  start) echo "port is already allocated" >&2; exit 1 ;;
esac"#,
    );

    cli()
        .agent_env()
        .env("AZP_DOCKER_BIN", docker.path())
        .args(&["start", "--rm-on-failure"])
        .fails()
        .stderr_has("failed to start agent container");

    assert_eq!(docker.calls().last().map(String::as_str), Some("rm -f deadbeef0001"));
}

#[cfg(unix)]
#[test]
fn start_health_timeout_fails_when_agent_never_appears() {
    let docker = FakeDocker::new(
        r#"case "$1" in
  create) echo "deadbeef0002" ;;
  exec) echo "agent 7 /bin/bash ./start.sh" ;;
esac"#,
    );

    cli()
        .agent_env()
        .env("AZP_DOCKER_BIN", docker.path())
        .env("AZPOOL_HEALTH_TIMEOUT_MS", "50")
        .args(&["start"])
        .fails()
        .stderr_has("[agent container agent-7] container health status failed");

    assert!(!docker.calls().iter().any(|c| c.starts_with("rm")));
}
