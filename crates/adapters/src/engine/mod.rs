// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container engine adapters
//!
//! The `ContainerEngine` trait is the only way the launcher touches a
//! container runtime:
//!
//! ```text
//! create(RuntimeSpec) ──► ContainerId
//! start(ContainerId)
//! exec(ContainerId, argv) ──► ExecOutput { output, exit_code }
//! remove(ContainerId)
//! ```
//!
//! [`DockerEngine`] drives the `docker` CLI. [`FakeContainerEngine`] is a
//! scripted stand-in for tests.

mod docker;

pub use docker::DockerEngine;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeContainerEngine};

use async_trait::async_trait;
use azp_core::{ContainerId, RuntimeSpec};
use thiserror::Error;

/// Errors from container engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine client could not be invoked at all.
    #[error("failed to exec {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The engine rejected the request.
    #[error("{operation} failed: {message}")]
    Command { operation: String, message: String },
}

impl EngineError {
    pub fn command(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command { operation: operation.into(), message: message.into() }
    }
}

/// Result of running a command inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecOutput {
    /// Combined stdout and stderr
    pub output: String,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn new(output: impl Into<String>, exit_code: i32) -> Self {
        Self { output: output.into(), exit_code }
    }

    /// Successful exec with the given output.
    pub fn ok(output: impl Into<String>) -> Self {
        Self::new(output, 0)
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Adapter for a container runtime
#[async_trait]
pub trait ContainerEngine: Send + Sync + 'static {
    /// Create (but do not start) a container from a runtime spec.
    async fn create(&self, spec: &RuntimeSpec) -> Result<ContainerId, EngineError>;

    /// Start a created container.
    async fn start(&self, id: &ContainerId) -> Result<(), EngineError>;

    /// Run `argv` inside a running container and collect its output.
    ///
    /// A non-zero exit of the command itself is reported through
    /// [`ExecOutput::exit_code`], not as an error.
    async fn exec(&self, id: &ContainerId, argv: &[&str]) -> Result<ExecOutput, EngineError>;

    /// Force-remove a container, stopping it first if needed.
    async fn remove(&self, id: &ContainerId) -> Result<(), EngineError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
