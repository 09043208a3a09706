// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration for an agent container.
//!
//! A [`RuntimeSpec`] is derived from an [`AgentConfig`] once per launch and
//! handed to the container engine's create call. It is never persisted.

use crate::agent::AgentConfig;
use std::fmt;
use std::time::Duration;

/// Image built from the bundled build context.
pub const DEFAULT_AGENT_IMAGE: &str = "azp_agent";

/// Agent containers are never restarted by the engine.
pub const RESTART_POLICY: &str = "no";

/// Structured per-container JSON logs.
pub const LOG_DRIVER: &str = "json-file";

/// Everything the engine needs to create one agent container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSpec {
    /// Container name (also the agent name registered with the pool)
    pub name: String,
    pub image: String,
    /// Environment variables, in injection order
    pub env: Vec<(String, String)>,
    pub port: PortBinding,
    /// Engine-native health check. Configured for visibility in
    /// `docker ps`; launch health is decided by the process probe instead.
    pub health_check: HealthCheck,
    pub restart_policy: &'static str,
    pub log_driver: &'static str,
}

impl RuntimeSpec {
    /// Build the runtime spec for an agent container using the default image.
    pub fn for_agent(config: &AgentConfig) -> Self {
        Self {
            name: config.container_name().to_string(),
            image: DEFAULT_AGENT_IMAGE.to_string(),
            env: agent_env(config),
            port: PortBinding::default(),
            health_check: HealthCheck::default(),
            restart_policy: RESTART_POLICY,
            log_driver: LOG_DRIVER,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Environment as `KEY=VALUE` strings.
    pub fn env_pairs(&self) -> Vec<String> {
        self.env.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }

    /// Look up an environment variable by key.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Map the agent config onto the variables the bootstrap script reads.
fn agent_env(config: &AgentConfig) -> Vec<(String, String)> {
    vec![
        ("AZP_URL".to_string(), config.organization_url().to_string()),
        ("AZP_TOKEN".to_string(), config.access_token().to_string()),
        ("AZP_POOL".to_string(), config.pool_name().to_string()),
        ("AZP_AGENT_NAME".to_string(), config.container_name().to_string()),
    ]
}

/// Publish one container TCP port on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    pub container_port: u16,
    pub host_ip: String,
    pub host_port: u16,
}

impl Default for PortBinding {
    /// Container port 80 on host port 80, all interfaces.
    fn default() -> Self {
        Self { container_port: 80, host_ip: "0.0.0.0".to_string(), host_port: 80 }
    }
}

impl fmt::Display for PortBinding {
    /// Formats as `host_ip:host_port:container_port/tcp`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}/tcp", self.host_ip, self.host_port, self.container_port)
    }
}

/// Engine-native health check schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    /// Command words, joined and run in shell form (`CMD-SHELL`)
    pub command: Vec<String>,
    pub interval: Duration,
    pub timeout: Duration,
    pub start_period: Duration,
    pub retries: u32,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            command: vec!["dir".to_string()],
            interval: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
            start_period: Duration::from_secs(15),
            // Effectively unbounded
            retries: 1000,
        }
    }
}

#[cfg(test)]
#[path = "runtime_spec_tests.rs"]
mod tests;
