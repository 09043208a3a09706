// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: the container engine and host credentials

pub mod credential;
pub mod engine;

pub use credential::{resolve_token, TokenSource};
pub use engine::{ContainerEngine, DockerEngine, EngineError, ExecOutput};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use engine::{EngineCall, FakeContainerEngine};
