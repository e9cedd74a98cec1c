// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-file task store

use crate::store::{StoreError, TaskStore};
use async_trait::async_trait;
use slipway_core::{Task, TaskId};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Tasks persisted as a JSON array in a single file.
///
/// The whole map is rewritten on every save via a temp file and rename, so
/// a crash mid-write never leaves a truncated store behind.
pub struct JsonTaskStore {
    path: PathBuf,
    tasks: Mutex<BTreeMap<u64, Task>>,
}

impl JsonTaskStore {
    /// Open a store, loading any tasks already at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let list: Vec<Task> = serde_json::from_str(&content)?;
                list.into_iter().map(|t| (t.id.0, t)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            tasks: Mutex::new(tasks),
        })
    }

    fn flush(&self, tasks: &BTreeMap<u64, Task>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&tasks.values().collect::<Vec<_>>())?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for JsonTaskStore {
    async fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.get(&id.0).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.insert(task.id.0, task.clone());
        self.flush(&tasks)
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tasks.values().cloned().collect())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
