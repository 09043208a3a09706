// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access token resolution for agent containers.
//!
//! The agent inside the container registers with the pool using a personal
//! access token. The token is resolved on the host at launch time and
//! injected as `AZP_TOKEN`. Resolution order:
//!
//! ```text
//!   1. explicit value (--token)
//!   2. AZP_TOKEN env var
//!   3. file named by AZP_TOKEN_FILE
//!   4. ~/.azp/token
//! ```
//!
//! Empty values are skipped at every step. File contents are trimmed.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a resolved token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Explicit,
    Env,
    File(PathBuf),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Explicit => f.write_str("command line"),
            TokenSource::Env => f.write_str("AZP_TOKEN"),
            TokenSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve the access token, walking the fallback chain.
///
/// Returns `None` if no non-empty token is available.
pub fn resolve_token(explicit: Option<&str>) -> Option<(String, TokenSource)> {
    // 1. Explicit value
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some((token.to_string(), TokenSource::Explicit));
    }

    // 2. Environment variable
    if let Ok(token) = std::env::var("AZP_TOKEN") {
        if !token.is_empty() {
            return Some((token, TokenSource::Env));
        }
    }

    // 3. AZP_TOKEN_FILE
    if let Some(path) = std::env::var("AZP_TOKEN_FILE").ok().filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        if let Some(token) = read_token_file(&path) {
            return Some((token, TokenSource::File(path)));
        }
    }

    // 4. ~/.azp/token
    let path = default_token_file()?;
    let token = read_token_file(&path)?;
    Some((token, TokenSource::File(path)))
}

/// Read a token from a file, trimming surrounding whitespace.
fn read_token_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let token = content.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Resolve `~/.azp/token`.
fn default_token_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".azp").join("token"))
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
