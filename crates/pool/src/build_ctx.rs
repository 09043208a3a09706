// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-context materializer.
//!
//! Writes the two files needed to build the agent image into a fresh
//! directory. Both payloads are embedded in the binary at compile time.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DOCKERFILE: &[u8] = include_bytes!("../assets/Dockerfile");
const START_SCRIPT: &[u8] = include_bytes!("../assets/start.sh");

/// One of the bundled build-context files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Dockerfile,
    StartScript,
}

impl Payload {
    pub const ALL: [Payload; 2] = [Payload::Dockerfile, Payload::StartScript];

    pub fn file_name(&self) -> &'static str {
        match self {
            Payload::Dockerfile => "Dockerfile",
            Payload::StartScript => "start.sh",
        }
    }

    /// Unix mode the written file ends up with.
    pub fn mode(&self) -> u32 {
        match self {
            Payload::Dockerfile => 0o644,
            Payload::StartScript => 0o755,
        }
    }

    /// Embedded bytes. Fails if the payload was bundled empty.
    pub fn read(&self) -> Result<&'static [u8], BuildCtxError> {
        let bytes = match self {
            Payload::Dockerfile => DOCKERFILE,
            Payload::StartScript => START_SCRIPT,
        };
        if bytes.is_empty() {
            return Err(BuildCtxError::ReadPayload { payload: *self });
        }
        Ok(bytes)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Errors from build-context creation. All are terminal; a partially
/// written directory is left in place.
#[derive(Debug, Error)]
pub enum BuildCtxError {
    #[error("mkdir {}: {source}", path.display())]
    MkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read bundled {payload}: payload is empty")]
    ReadPayload { payload: Payload },
    #[error("write {payload} to {}: {source}", path.display())]
    WriteFile {
        payload: Payload,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("set permissions on {}: {source}", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paths written by [`create_build_ctx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub root: PathBuf,
    pub dockerfile: PathBuf,
    pub script: PathBuf,
}

/// Create `path` and write the Dockerfile and `start.sh` into it.
///
/// `path` must not exist yet: this never merges into an existing directory.
pub fn create_build_ctx(path: impl AsRef<Path>) -> Result<BuildContext, BuildCtxError> {
    let root = path.as_ref();
    tracing::info!(path = %root.display(), "creating agent image build context");

    fs::create_dir(root)
        .map_err(|source| BuildCtxError::MkDir { path: root.to_path_buf(), source })?;

    // Read both payloads before writing anything
    let dockerfile = Payload::Dockerfile.read()?;
    let script = Payload::StartScript.read()?;

    let dockerfile_path = write_payload(root, Payload::Dockerfile, dockerfile)?;
    let script_path = write_payload(root, Payload::StartScript, script)?;

    tracing::info!(path = %root.display(), "build context ready");
    Ok(BuildContext { root: root.to_path_buf(), dockerfile: dockerfile_path, script: script_path })
}

fn write_payload(root: &Path, payload: Payload, bytes: &[u8]) -> Result<PathBuf, BuildCtxError> {
    let path = root.join(payload.file_name());
    fs::write(&path, bytes).map_err(|source| BuildCtxError::WriteFile {
        payload,
        path: path.clone(),
        source,
    })?;
    set_mode(&path, payload.mode())?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote {}", payload);
    Ok(path)
}

/// Set the exact mode, independent of the process umask.
#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), BuildCtxError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|source| BuildCtxError::Permissions { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), BuildCtxError> {
    Ok(())
}

#[cfg(test)]
#[path = "build_ctx_tests.rs"]
mod tests;
