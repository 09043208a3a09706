// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for running the binary and asserting on its output.

use std::path::{Path, PathBuf};
use std::process::Output;

pub use tempfile::TempDir;

/// Env vars that would leak host settings into a run.
const HOST_KEYS: &[&str] = &[
    "AZP_URL",
    "AZP_TOKEN",
    "AZP_TOKEN_FILE",
    "AZP_POOL",
    "AZP_AGENT_NAME",
    "AZPOOL_IMAGE",
    "AZPOOL_POLL_INTERVAL_MS",
    "AZPOOL_HEALTH_TIMEOUT_MS",
    "AZPOOL_LOG",
    "RUST_LOG",
    "AZP_DOCKER_BIN",
];

pub struct Cli {
    cmd: assert_cmd::Command,
    // Keeps the scratch HOME alive for the duration of the run
    _home: TempDir,
}

/// Command for the `azpool` binary with a scrubbed environment.
pub fn cli() -> Cli {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("azpool").unwrap();
    for key in HOST_KEYS {
        cmd.env_remove(key);
    }
    cmd.env("HOME", home.path()).env("NO_COLOR", "1");
    Cli { cmd, _home: home }
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn pwd(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Agent settings for a launch, all via the environment.
    pub fn agent_env(self) -> Self {
        self.env("AZP_URL", "https://dev.azure.com/contoso")
            .env("AZP_TOKEN", "pat")
            .env("AZP_POOL", "linux")
            .env("AZP_AGENT_NAME", "agent-7")
            .env("AZPOOL_POLL_INTERVAL_MS", "10")
    }

    pub fn passes(self) -> Run {
        self.exits(0)
    }

    pub fn fails(self) -> Run {
        self.exits(1)
    }

    pub fn exits(mut self, code: i32) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct Run {
    output: Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {:?}:\n{}", needle, stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout has {:?}:\n{}", needle, stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {:?}:\n{}", needle, stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }
}

/// Shell script standing in for the docker CLI.
///
/// Every invocation is appended to `calls.log` next to the script.
#[cfg(unix)]
pub struct FakeDocker {
    dir: TempDir,
}

#[cfg(unix)]
impl FakeDocker {
    /// `body` runs after logging, with `$1` the docker subcommand.
    pub fn new(body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let script = format!("#!/bin/sh\necho \"$@\" >> '{}'\n{}\n", log.display(), body);
        let path = dir.path().join("docker");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    /// Creates succeed with sequential IDs and the agent is always running.
    pub fn healthy() -> Self {
        Self::new(
            r#"case "$1" in
  create)
    n=$(cat "$(dirname "$0")/count" 2>/dev/null || echo 0)
    n=$((n + 1))
    echo "$n" > "$(dirname "$0")/count"
    echo "c0ffee00000$n"
    ;;
  start) echo "$2" ;;
  exec) echo "agent 42 /azp/bin/Agent.Listener run" ;;
esac"#,
        )
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("docker")
    }

    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
