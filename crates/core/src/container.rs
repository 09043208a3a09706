// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container identifiers and the registry of launched containers.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque identifier assigned by the container engine at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, matching the engine's short ID form.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(12) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContainerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every container this process has created, in creation order.
///
/// Owned by whoever launches agents and cloned into anything that needs to
/// address those containers later. Clones share the same list. Appends are
/// serialized, so concurrent launches cannot lose entries. Nothing is ever
/// removed: cleanup of the containers themselves is the caller's concern.
#[derive(Clone, Default)]
pub struct ContainerRegistry {
    ids: Arc<Mutex<Vec<ContainerId>>>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created container.
    ///
    /// Returns `false` (and records nothing) if the ID is already present.
    pub fn record(&self, id: ContainerId) -> bool {
        let mut ids = self.ids.lock();
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        true
    }

    /// Snapshot of recorded IDs in creation order.
    pub fn ids(&self) -> Vec<ContainerId> {
        self.ids.lock().clone()
    }

    pub fn contains(&self, id: &ContainerId) -> bool {
        self.ids.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.lock().is_empty()
    }
}

impl fmt::Debug for ContainerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids.lock().iter()).finish()
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
