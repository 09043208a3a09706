// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted container engine for tests

use super::{ContainerEngine, EngineError, ExecOutput};
use async_trait::async_trait;
use azp_core::{ContainerId, RuntimeSpec};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Recorded engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Create { name: String, image: String },
    Start { id: ContainerId },
    Exec { id: ContainerId, argv: Vec<String> },
    Remove { id: ContainerId },
}

struct FakeEngineState {
    calls: Vec<EngineCall>,
    specs: Vec<RuntimeSpec>,
    next_id: u32,
    create_error: Option<String>,
    start_error: Option<String>,
    remove_error: Option<String>,
    /// Scripted exec results, consumed in order
    exec_script: VecDeque<Result<ExecOutput, String>>,
    /// Returned once the script is exhausted
    exec_default: ExecOutput,
}

/// Fake container engine for testing
///
/// Creates containers named `fake-<n>` unless told to fail. Exec results are
/// scripted with [`push_exec`](Self::push_exec) and friends; once the script
/// runs out every exec returns the default output (empty, exit 0).
#[derive(Clone)]
pub struct FakeContainerEngine {
    inner: Arc<Mutex<FakeEngineState>>,
}

impl Default for FakeContainerEngine {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeEngineState {
                calls: Vec::new(),
                specs: Vec::new(),
                next_id: 1,
                create_error: None,
                start_error: None,
                remove_error: None,
                exec_script: VecDeque::new(),
                exec_default: ExecOutput::default(),
            })),
        }
    }
}

impl FakeContainerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create` fail with `message`.
    pub fn fail_create(&self, message: impl Into<String>) {
        self.inner.lock().create_error = Some(message.into());
    }

    /// Make every subsequent `start` fail with `message`.
    pub fn fail_start(&self, message: impl Into<String>) {
        self.inner.lock().start_error = Some(message.into());
    }

    /// Make every subsequent `remove` fail with `message`.
    pub fn fail_remove(&self, message: impl Into<String>) {
        self.inner.lock().remove_error = Some(message.into());
    }

    /// Queue one exec result.
    pub fn push_exec(&self, output: ExecOutput) {
        self.inner.lock().exec_script.push_back(Ok(output));
    }

    /// Queue one exec transport error.
    pub fn push_exec_error(&self, message: impl Into<String>) {
        self.inner.lock().exec_script.push_back(Err(message.into()));
    }

    /// Output returned once the exec script is exhausted.
    pub fn set_exec_default(&self, output: ExecOutput) {
        self.inner.lock().exec_default = output;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.lock().calls.clone()
    }

    /// Specs passed to `create`, in order
    pub fn created_specs(&self) -> Vec<RuntimeSpec> {
        self.inner.lock().specs.clone()
    }

    /// Number of exec calls made so far
    pub fn exec_count(&self) -> usize {
        self.inner.lock().calls.iter().filter(|c| matches!(c, EngineCall::Exec { .. })).count()
    }
}

#[async_trait]
impl ContainerEngine for FakeContainerEngine {
    async fn create(&self, spec: &RuntimeSpec) -> Result<ContainerId, EngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Create { name: spec.name.clone(), image: spec.image.clone() });
        inner.specs.push(spec.clone());
        if let Some(ref message) = inner.create_error {
            return Err(EngineError::command("create", message.clone()));
        }
        let id = ContainerId::new(format!("fake-{}", inner.next_id));
        inner.next_id += 1;
        Ok(id)
    }

    async fn start(&self, id: &ContainerId) -> Result<(), EngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Start { id: id.clone() });
        match inner.start_error {
            Some(ref message) => Err(EngineError::command("start", message.clone())),
            None => Ok(()),
        }
    }

    async fn exec(&self, id: &ContainerId, argv: &[&str]) -> Result<ExecOutput, EngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Exec {
            id: id.clone(),
            argv: argv.iter().map(|a| a.to_string()).collect(),
        });
        match inner.exec_script.pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(message)) => Err(EngineError::command("exec", message)),
            None => Ok(inner.exec_default.clone()),
        }
    }

    async fn remove(&self, id: &ContainerId) -> Result<(), EngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Remove { id: id.clone() });
        match inner.remove_error {
            Some(ref message) => Err(EngineError::command("rm", message.clone())),
            None => Ok(()),
        }
    }
}
