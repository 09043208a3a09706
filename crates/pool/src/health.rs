// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent health probe.
//!
//! The agent does not expose anything the engine's own health check can
//! see, so readiness is decided by looking for the listener process:
//!
//! ```text
//! loop:
//!   exec `ps aux` in the container
//!     exec error / non-zero exit ──► fail (no retry)
//!     output has "Agent.Listener" ──► ready (no further sleep)
//!     otherwise                   ──► sleep interval, probe again
//! ```
//!
//! Attempts are unbounded unless a deadline is set. Cancellation is
//! observed while sleeping.

use azp_adapters::{ContainerEngine, EngineError};
use azp_core::ContainerId;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Substring identifying the agent process in `ps` output.
pub const AGENT_MARKER: &str = "Agent.Listener";

/// Process listing run inside the container.
pub const PROBE_COMMAND: [&str; 2] = ["ps", "aux"];

/// Default pause between probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// How often to probe, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    pub interval: Duration,
    /// `None` probes until the marker appears or a probe fails.
    pub deadline: Option<Duration>,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self { interval: DEFAULT_POLL_INTERVAL, deadline: None }
    }
}

impl HealthPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Why the probe loop gave up.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("health probe failed: {0}")]
    Probe(#[source] EngineError),
    #[error("health probe exited with status {exit_code}: {output}")]
    ProbeExit { exit_code: i32, output: String },
    #[error("agent process not observed within {0:?}")]
    TimedOut(Duration),
    #[error("health check cancelled")]
    Cancelled,
}

/// Run the probe once. `Ok(true)` means the agent process is running.
pub async fn probe<E>(engine: &E, id: &ContainerId) -> Result<bool, HealthError>
where
    E: ContainerEngine + ?Sized,
{
    let out = engine.exec(id, &PROBE_COMMAND).await.map_err(HealthError::Probe)?;
    if !out.success() {
        return Err(HealthError::ProbeExit {
            exit_code: out.exit_code,
            output: out.output.trim().to_string(),
        });
    }
    Ok(out.output.contains(AGENT_MARKER))
}

/// Probe until the agent process shows up.
///
/// Returns the number of probes it took.
pub async fn wait_until_healthy<E>(
    engine: &E,
    id: &ContainerId,
    container_name: &str,
    policy: HealthPolicy,
    cancel: &CancellationToken,
) -> Result<u32, HealthError>
where
    E: ContainerEngine + ?Sized,
{
    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        if probe(engine, id).await? {
            return Ok(attempt);
        }

        let mut pause = policy.interval;
        if let Some(deadline) = policy.deadline {
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                return Err(HealthError::TimedOut(deadline));
            }
            pause = pause.min(deadline - elapsed);
        }

        tracing::info!(
            container = container_name,
            attempt,
            "waiting on container health check"
        );

        tokio::select! {
            _ = cancel.cancelled() => return Err(HealthError::Cancelled),
            _ = tokio::time::sleep(pause) => {}
        }
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
