// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent pool launcher.
//!
//! One launch is strictly sequential:
//!
//! ```text
//! AgentConfig ──► RuntimeSpec ──► create ──► record id ──► start ──► probe loop
//! ```
//!
//! The container ID is recorded as soon as creation succeeds, so a container
//! whose start or health check fails is still reachable through the
//! registry. Nothing is rolled back on failure.

use crate::health::{self, HealthError, HealthPolicy};
use azp_adapters::{ContainerEngine, EngineError};
use azp_core::{AgentConfig, ContainerId, ContainerRegistry, RuntimeSpec, DEFAULT_AGENT_IMAGE};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from launching an agent container.
///
/// Every message names the container and the stage that failed.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("[agent container {name}] failed to create agent container: {source}")]
    Create {
        name: String,
        #[source]
        source: EngineError,
    },
    #[error("[agent container {name}] failed to start agent container: {source}")]
    Start {
        name: String,
        id: ContainerId,
        #[source]
        source: EngineError,
    },
    #[error("[agent container {name}] container health status failed: {source}")]
    Health {
        name: String,
        id: ContainerId,
        #[source]
        source: HealthError,
    },
}

impl LaunchError {
    pub fn container_name(&self) -> &str {
        match self {
            LaunchError::Create { name, .. }
            | LaunchError::Start { name, .. }
            | LaunchError::Health { name, .. } => name,
        }
    }

    /// ID of the container left behind, if creation got that far.
    pub fn container_id(&self) -> Option<&ContainerId> {
        match self {
            LaunchError::Create { .. } => None,
            LaunchError::Start { id, .. } | LaunchError::Health { id, .. } => Some(id),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LaunchError::Health { source: HealthError::Cancelled, .. })
    }
}

/// Creates, starts and health-checks agent containers.
///
/// Owns the registry of every container it creates. Clone the registry
/// handle out with [`registry`](Self::registry) to address those containers
/// later.
pub struct PoolLauncher<E: ContainerEngine> {
    engine: E,
    registry: ContainerRegistry,
    image: String,
    health: HealthPolicy,
    cancel: CancellationToken,
}

impl<E: ContainerEngine> PoolLauncher<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            registry: ContainerRegistry::new(),
            image: DEFAULT_AGENT_IMAGE.to_string(),
            health: HealthPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Record into an existing registry instead of a fresh one.
    pub fn with_registry(mut self, registry: ContainerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_health_policy(mut self, policy: HealthPolicy) -> Self {
        self.health = policy;
        self
    }

    /// Token that aborts a pending health check.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    /// Runtime spec this launcher would create for `config`.
    pub fn runtime_spec(&self, config: &AgentConfig) -> RuntimeSpec {
        RuntimeSpec::for_agent(config).with_image(self.image.clone())
    }

    /// Launch one agent container and wait until its agent process is running.
    pub async fn start_agent_pool(&self, config: &AgentConfig) -> Result<ContainerId, LaunchError> {
        let start = std::time::Instant::now();
        let result = self.launch(config).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(id) => tracing::info!(
                container = config.container_name(),
                container_id = %id.short(),
                elapsed_ms,
                "agent container started successfully"
            ),
            Err(e) => tracing::error!(
                container = config.container_name(),
                elapsed_ms,
                error = %e,
                "agent container launch failed"
            ),
        }
        result
    }

    /// Launch agents one after another, stopping at the first failure.
    pub async fn start_agents(
        &self,
        configs: &[AgentConfig],
    ) -> Result<Vec<ContainerId>, LaunchError> {
        let mut ids = Vec::with_capacity(configs.len());
        for config in configs {
            ids.push(self.start_agent_pool(config).await?);
        }
        Ok(ids)
    }

    /// Force-remove every container in the registry.
    ///
    /// Best effort: failures are logged and returned, and the registry
    /// itself is left unchanged.
    pub async fn teardown(&self) -> Vec<(ContainerId, EngineError)> {
        let mut failures = Vec::new();
        for id in self.registry.ids() {
            match self.engine.remove(&id).await {
                Ok(()) => tracing::info!(container_id = %id.short(), "removed agent container"),
                Err(e) => {
                    tracing::warn!(container_id = %id.short(), error = %e, "failed to remove agent container");
                    failures.push((id, e));
                }
            }
        }
        failures
    }

    async fn launch(&self, config: &AgentConfig) -> Result<ContainerId, LaunchError> {
        let name = config.container_name();
        let spec = self.runtime_spec(config);

        tracing::info!(container = name, image = %spec.image, "creating container");
        let id = self
            .engine
            .create(&spec)
            .await
            .map_err(|source| LaunchError::Create { name: name.to_string(), source })?;
        self.registry.record(id.clone());
        tracing::info!(container = name, container_id = %id.short(), "container created");

        tracing::info!(container = name, "starting container");
        self.engine.start(&id).await.map_err(|source| LaunchError::Start {
            name: name.to_string(),
            id: id.clone(),
            source,
        })?;

        tracing::info!(container = name, "checking container health");
        let attempts =
            health::wait_until_healthy(&self.engine, &id, name, self.health, &self.cancel)
                .await
                .map_err(|source| LaunchError::Health {
                    name: name.to_string(),
                    id: id.clone(),
                    source,
                })?;
        tracing::debug!(container = name, attempts, "agent process observed");

        Ok(id)
    }
}

/// Configs for `count` agents sharing one set of credentials.
///
/// A single agent keeps the base name; several are suffixed `-1`, `-2`, ...
pub fn numbered_configs(base: &AgentConfig, count: u32) -> Vec<AgentConfig> {
    match count {
        0 => Vec::new(),
        1 => vec![base.clone()],
        n => (1..=n).map(|i| base.renamed(format!("{}-{}", base.container_name(), i))).collect(),
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
