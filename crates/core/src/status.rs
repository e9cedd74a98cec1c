// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task status lifecycle and broadcast messages

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a task.
///
/// A closed set: storage and the wire both carry the lowercase tag, so an
/// unknown status can neither be persisted nor broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Initial state; no run has been triggered since creation
    Stopped,
    /// A run is in progress
    Running,
    /// The most recent run completed all stages
    Success,
    /// The most recent run failed
    Error,
}

impl Status {
    /// The wire tag for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Stopped => "stopped",
            Status::Running => "running",
            Status::Success => "success",
            Status::Error => "error",
        }
    }

    /// Whether this status ends a run (the task remains triggerable)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Success | Status::Error)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One broadcast unit: task identity, status, current success counter.
///
/// Transient; never persisted independently of the task it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub id: TaskId,
    pub status: Status,
    pub count: u64,
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
