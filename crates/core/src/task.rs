// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task entity

use crate::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        TaskId(id)
    }
}

/// The persisted entity driving execution.
///
/// `source` is the raw pipeline text; `parsed` is the most recent parsed
/// form, serialized. Edits to `source` take effect on the next trigger;
/// an in-flight run already holds its own copy of the text it started with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Raw pipeline definition text
    pub source: String,
    /// Most recent parsed form of `source`
    #[serde(default)]
    pub parsed: Option<serde_json::Value>,
    pub status: Status,
    /// Number of runs that reached `Success`. Never decreases.
    pub count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task in the `Stopped` state
    pub fn new(id: impl Into<TaskId>, name: impl Into<String>, source: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: id.into(),
            name: name.into(),
            source: source.into(),
            parsed: None,
            status: Status::Stopped,
            count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
