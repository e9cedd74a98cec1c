// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task store trait and errors

use async_trait::async_trait;
use slipway_core::{Task, TaskId};
use thiserror::Error;

/// Errors from the task store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistence boundary for tasks.
///
/// Callers treat `get` and `save` as potentially failing and never retry.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Fetch a task by id
    async fn get(&self, id: TaskId) -> Result<Task, StoreError>;

    /// Persist `task`, inserting or replacing the stored version
    async fn save(&self, task: &Task) -> Result<(), StoreError>;

    /// All tasks, ordered by id
    async fn list(&self) -> Result<Vec<Task>, StoreError>;
}
