// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` (wrapped in `anyhow`) instead of calling
//! `std::process::exit()`, and `main()` maps it to the exit status.

use azp_pool::LaunchError;
use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub const FAILURE: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CANCELLED: i32 = 130;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Missing or invalid input.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(Self::USAGE, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(Self::FAILURE, message)
    }
}

impl From<&LaunchError> for ExitError {
    fn from(err: &LaunchError) -> Self {
        let code = if err.is_cancelled() { Self::CANCELLED } else { Self::FAILURE };
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
