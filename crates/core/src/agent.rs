// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent configuration supplied by the caller.
//!
//! The four fields are passed through to the container untouched. Nothing
//! here validates them: a bad token or URL is rejected by the remote pool
//! once the agent inside the container tries to register.

use std::fmt;

/// Details needed to register one agent container with a pool.
///
/// Immutable once constructed. `Debug` redacts the access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AgentConfig {
    access_token: String,
    organization_url: String,
    pool_name: String,
    container_name: String,
}

impl AgentConfig {
    pub fn new(
        access_token: impl Into<String>,
        organization_url: impl Into<String>,
        pool_name: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            organization_url: organization_url.into(),
            pool_name: pool_name.into(),
            container_name: container_name.into(),
        }
    }

    /// Personal access token the agent registers with (`AZP_TOKEN`).
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Organization URL, e.g. `https://dev.azure.com/contoso` (`AZP_URL`).
    pub fn organization_url(&self) -> &str {
        &self.organization_url
    }

    /// Pool the agent joins (`AZP_POOL`).
    pub fn pool_name(&self) -> &str {
        &self.pool_name
    }

    /// Container name, also used as the agent name (`AZP_AGENT_NAME`).
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// Copy of this config with a different container name.
    ///
    /// Used when launching several agents from one set of credentials.
    pub fn renamed(&self, container_name: impl Into<String>) -> Self {
        Self { container_name: container_name.into(), ..self.clone() }
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("access_token", &"<redacted>")
            .field("organization_url", &self.organization_url)
            .field("pool_name", &self.pool_name)
            .field("container_name", &self.container_name)
            .finish()
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
