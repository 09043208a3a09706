// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker engine adapter, driven through the `docker` CLI.

use super::{ContainerEngine, EngineError, ExecOutput};
use async_trait::async_trait;
use azp_core::{ContainerId, RuntimeSpec};
use std::process::Output;
use std::time::Duration;

/// Container engine backed by the `docker` CLI.
///
/// The binary defaults to `docker` on `PATH` and can be overridden with
/// `AZP_DOCKER_BIN` (e.g. `podman`).
#[derive(Debug, Clone)]
pub struct DockerEngine {
    program: String,
}

impl Default for DockerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerEngine {
    pub fn new() -> Self {
        let program = std::env::var("AZP_DOCKER_BIN")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "docker".to_string());
        Self { program }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn output(&self, args: &[String]) -> Result<Output, EngineError> {
        tokio::process::Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|source| EngineError::Spawn { program: self.program.clone(), source })
    }

    /// Run a docker command and return trimmed stdout on success.
    async fn run(&self, operation: &str, args: &[String]) -> Result<String, EngineError> {
        let output = self.output(args).await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(EngineError::command(operation, stderr.trim()))
        }
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn create(&self, spec: &RuntimeSpec) -> Result<ContainerId, EngineError> {
        tracing::debug!(container = %spec.name, image = %spec.image, "docker create");
        let stdout = self.run("create", &create_args(spec)).await?;
        // Pull progress can precede the ID; the ID is always the last line.
        match stdout.lines().last().map(str::trim).filter(|l| !l.is_empty()) {
            Some(id) => Ok(ContainerId::new(id)),
            None => Err(EngineError::command("create", "no container id returned")),
        }
    }

    async fn start(&self, id: &ContainerId) -> Result<(), EngineError> {
        tracing::debug!(container_id = %id.short(), "docker start");
        self.run("start", &["start".to_string(), id.to_string()]).await.map(|_| ())
    }

    async fn exec(&self, id: &ContainerId, argv: &[&str]) -> Result<ExecOutput, EngineError> {
        let mut args = vec!["exec".to_string(), id.to_string()];
        args.extend(argv.iter().map(|a| a.to_string()));

        let output = self.output(&args).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Killed by a signal has no code
        let exit_code = output.status.code().unwrap_or(-1);

        if is_engine_failure(exit_code, &stderr) {
            return Err(EngineError::command("exec", stderr.trim()));
        }

        let mut combined = stdout.into_owned();
        combined.push_str(&stderr);
        Ok(ExecOutput::new(combined, exit_code))
    }

    async fn remove(&self, id: &ContainerId) -> Result<(), EngineError> {
        tracing::debug!(container_id = %id.short(), "docker rm");
        self.run("rm", &["rm".to_string(), "-f".to_string(), id.to_string()]).await.map(|_| ())
    }
}

/// Build `docker create` arguments for a runtime spec.
pub(crate) fn create_args(spec: &RuntimeSpec) -> Vec<String> {
    let mut args = vec!["create".to_string(), "--name".to_string(), spec.name.clone()];

    for pair in spec.env_pairs() {
        args.push("-e".to_string());
        args.push(pair);
    }

    args.push("-p".to_string());
    args.push(spec.port.to_string());

    let hc = &spec.health_check;
    args.extend([
        "--health-cmd".to_string(),
        hc.command.join(" "),
        "--health-interval".to_string(),
        format_duration(hc.interval),
        "--health-timeout".to_string(),
        format_duration(hc.timeout),
        "--health-start-period".to_string(),
        format_duration(hc.start_period),
        "--health-retries".to_string(),
        hc.retries.to_string(),
    ]);

    args.extend([
        "--restart".to_string(),
        spec.restart_policy.to_string(),
        "--log-driver".to_string(),
        spec.log_driver.to_string(),
    ]);

    args.push(spec.image.clone());
    args
}

/// Format a duration the way docker's flag parser accepts it.
fn format_duration(d: Duration) -> String {
    if d.subsec_millis() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}

/// Whether a failed `docker exec` was the engine's fault rather than the command's.
///
/// Docker reports its own failures (daemon unreachable, container not
/// running, binary missing in the image) with 125-127 or an
/// "Error response from daemon" message.
fn is_engine_failure(exit_code: i32, stderr: &str) -> bool {
    if exit_code == 0 {
        return false;
    }
    matches!(exit_code, 125..=127)
        || stderr.contains("Error response from daemon")
        || stderr.contains("Cannot connect to the Docker daemon")
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
