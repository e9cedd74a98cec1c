// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake stores for tests

use crate::store::{StoreError, TaskStore};
use async_trait::async_trait;
use slipway_core::{Task, TaskId};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory task store
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<BTreeMap<u64, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `tasks`
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks.into_iter().map(|t| (t.id.0, t)).collect()),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.get(&id.0).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.insert(task.id.0, task.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tasks.values().cloned().collect())
    }
}

/// A store whose saves start failing after a budget of successes.
///
/// Reads always succeed, so the degraded persistence paths can be driven
/// precisely: budget 0 fails the first save, budget 1 lets the `running`
/// transition persist and fails the terminal one.
pub struct FailingTaskStore {
    inner: MemoryTaskStore,
    saves_left: Mutex<usize>,
}

impl FailingTaskStore {
    /// Fail every save
    pub fn failing_immediately(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self::failing_after(0, tasks)
    }

    /// Allow `budget` saves, then fail the rest
    pub fn failing_after(budget: usize, tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            inner: MemoryTaskStore::with_tasks(tasks),
            saves_left: Mutex::new(budget),
        }
    }
}

#[async_trait]
impl TaskStore for FailingTaskStore {
    async fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        self.inner.get(id).await
    }

    async fn save(&self, task: &Task) -> Result<(), StoreError> {
        {
            let mut saves_left = self.saves_left.lock().unwrap_or_else(|e| e.into_inner());
            if *saves_left == 0 {
                return Err(StoreError::Backend("save failed".to_string()));
            }
            *saves_left -= 1;
        }
        self.inner.save(task).await
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.inner.list().await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
