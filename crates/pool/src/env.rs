// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for launch settings.

use crate::health::{HealthPolicy, DEFAULT_POLL_INTERVAL};
use azp_core::DEFAULT_AGENT_IMAGE;
use std::time::Duration;

/// Agent image: AZPOOL_IMAGE > `azp_agent`
pub fn image() -> String {
    std::env::var("AZPOOL_IMAGE")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_AGENT_IMAGE.to_string())
}

/// Pause between health probes (default 30s, `AZPOOL_POLL_INTERVAL_MS`).
pub fn poll_interval() -> Duration {
    std::env::var("AZPOOL_POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

/// Upper bound on the health check (`AZPOOL_HEALTH_TIMEOUT_MS`). Unset means
/// probe until the agent shows up or a probe fails.
pub fn health_timeout() -> Option<Duration> {
    std::env::var("AZPOOL_HEALTH_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Health policy assembled from the environment.
pub fn health_policy() -> HealthPolicy {
    HealthPolicy::default().with_interval(poll_interval()).with_deadline(health_timeout())
}

/// Organization URL from `AZP_URL`.
pub fn organization_url() -> Option<String> {
    non_empty("AZP_URL")
}

/// Pool name from `AZP_POOL`.
pub fn pool_name() -> Option<String> {
    non_empty("AZP_POOL")
}

/// Agent/container name from `AZP_AGENT_NAME`.
pub fn agent_name() -> Option<String> {
    non_empty("AZP_AGENT_NAME")
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
