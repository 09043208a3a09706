// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! azp-pool: build-context setup and agent container launches
//!
//! - [`build_ctx`] writes the bundled Dockerfile and bootstrap script
//! - [`launcher`] creates, starts and health-checks agent containers
//! - [`health`] is the in-container process probe loop

pub mod build_ctx;
pub mod env;
pub mod health;
pub mod launcher;

pub use build_ctx::{create_build_ctx, BuildContext, BuildCtxError, Payload};
pub use health::{HealthError, HealthPolicy, AGENT_MARKER};
pub use launcher::{numbered_configs, LaunchError, PoolLauncher};
