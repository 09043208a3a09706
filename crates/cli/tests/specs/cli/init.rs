// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `azpool init` specs

use crate::prelude::*;

#[test]
fn init_writes_dockerfile_and_script() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("ctx");

    cli()
        .args(&["init", target.to_str().unwrap()])
        .passes()
        .stdout_has("Dockerfile")
        .stdout_has("start.sh")
        .stdout_has("docker build -t azp_agent");

    assert!(target.join("Dockerfile").is_file());
    assert!(target.join("start.sh").is_file());
}

#[cfg(unix)]
#[test]
fn init_sets_script_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("ctx");
    cli().args(&["init", target.to_str().unwrap()]).passes();

    let mode = std::fs::metadata(target.join("start.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    let mode = std::fs::metadata(target.join("Dockerfile")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn init_defaults_to_azp_agent_in_cwd() {
    let temp = tempfile::tempdir().unwrap();

    cli().args(&["init"]).pwd(temp.path()).passes();

    assert!(temp.path().join("azp-agent/Dockerfile").is_file());
}

#[test]
fn init_refuses_existing_directory() {
    let temp = tempfile::tempdir().unwrap();

    cli().args(&["init", temp.path().to_str().unwrap()]).fails().stderr_has("error:");

    assert!(!temp.path().join("Dockerfile").exists());
}

#[test]
fn init_json_reports_paths() {
    let temp = tempfile::tempdir().unwrap();
    let target = temp.path().join("ctx");

    let run = cli().args(&["init", target.to_str().unwrap(), "--format", "json"]).passes();

    let value: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(value["root"], target.to_str().unwrap());
}
