// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! azp-core: data model for provisioning Azure Pipelines agent containers

pub mod agent;
pub mod container;
pub mod runtime_spec;

pub use agent::AgentConfig;
pub use container::{ContainerId, ContainerRegistry};
pub use runtime_spec::{HealthCheck, PortBinding, RuntimeSpec, DEFAULT_AGENT_IMAGE};
