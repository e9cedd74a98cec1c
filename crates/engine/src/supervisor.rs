// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run lifecycle supervision

use chrono::Utc;
use slipway_core::{Status, StatusMessage, Task, TaskId};
use slipway_hub::StatusHub;
use slipway_pipeline::parse_pipeline;
use slipway_runner::run_sequence;
use slipway_storage::{StoreError, TaskStore};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::Semaphore;

/// Errors surfaced synchronously to the trigger caller.
///
/// Everything that goes wrong after `execute` returns is reported only
/// through the persisted status and the hub.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task {0} already has a run in flight")]
    Conflict(TaskId),
    #[error("store error: {0}")]
    Store(StoreError),
}

/// Supervisor tuning
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Ceiling on simultaneously running executions; triggers beyond it
    /// wait for a permit instead of spawning unbounded shell processes
    pub max_concurrent: usize,
    /// Directory every run starts from, regardless of where a prior run's
    /// directory changes ended up
    pub base_dir: PathBuf,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Drives task runs through the status lifecycle.
///
/// Cheap to clone; all clones share the store, hub, permit pool, and the
/// per-task in-flight set.
pub struct Supervisor<S> {
    store: Arc<S>,
    hub: StatusHub,
    permits: Arc<Semaphore>,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
    base_dir: PathBuf,
}

impl<S> Clone for Supervisor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hub: self.hub.clone(),
            permits: Arc::clone(&self.permits),
            in_flight: Arc::clone(&self.in_flight),
            base_dir: self.base_dir.clone(),
        }
    }
}

impl<S: TaskStore> Supervisor<S> {
    pub fn new(store: Arc<S>, hub: StatusHub, config: SupervisorConfig) -> Self {
        Self {
            store,
            hub,
            permits: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            base_dir: config.base_dir,
        }
    }

    /// Trigger a run of `id`.
    ///
    /// Synchronous only through the task lookup and the in-flight check;
    /// the run itself executes in the background and this call returns as
    /// soon as it is launched. A trigger while a run for the same id is in
    /// flight is rejected with `Conflict` rather than racing it.
    pub async fn execute(&self, id: TaskId) -> Result<(), ExecuteError> {
        let task = self.store.get(id).await.map_err(|e| match e {
            StoreError::NotFound(id) => ExecuteError::NotFound(id),
            other => ExecuteError::Store(other),
        })?;

        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
            if !in_flight.insert(id) {
                return Err(ExecuteError::Conflict(id));
            }
        }

        let supervisor = self.clone();
        tokio::spawn(async move {
            // Holds the id until the run is over, whichever path it takes
            let _guard = InFlightGuard {
                id,
                in_flight: Arc::clone(&supervisor.in_flight),
            };

            // Permit pool bounds how many runs execute at once; acquire
            // fails only when the pool is closed, which never happens here
            let Ok(_permit) = supervisor.permits.acquire().await else {
                return;
            };
            supervisor.run(task).await;
        });

        Ok(())
    }

    /// Runs currently executing or waiting for a permit
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    async fn run(&self, mut task: Task) {
        let id = task.id;
        tracing::info!(task = %id, name = %task.name, "run starting");

        task.status = Status::Running;
        if let Err(e) = self.persist(&mut task).await {
            tracing::error!(task = %id, error = %e, "failed to persist running status");
            // The store is failing: report the error without another write
            task.status = Status::Error;
            self.broadcast(&task);
            return;
        }
        self.broadcast(&task);

        let def = match parse_pipeline(&task.source) {
            Ok(def) => def,
            Err(e) => {
                tracing::error!(task = %id, error = %e, "pipeline parse failed");
                self.finish_with_error(task).await;
                return;
            }
        };
        task.parsed = serde_json::to_value(&def).ok();

        if let Err(e) = run_sequence(&def.build, &self.base_dir).await {
            tracing::error!(task = %id, error = %e, "build stage failed");
            self.finish_with_error(task).await;
            return;
        }

        if let Some(deploy) = &def.deploy {
            if !deploy.run.is_empty() {
                tracing::info!(task = %id, platform = %deploy.platform, "deploy stage starting");
                if let Err(e) = run_sequence(&deploy.run, &self.base_dir).await {
                    tracing::error!(task = %id, error = %e, "deploy stage failed");
                    self.finish_with_error(task).await;
                    return;
                }
            }
        }

        let durable_count = task.count;
        task.count += 1;
        task.status = Status::Success;
        if let Err(e) = self.persist(&mut task).await {
            tracing::error!(task = %id, error = %e, "failed to persist success");
            // Never announce a success that was not durably recorded; the
            // broadcast carries the last count the store actually holds
            task.status = Status::Error;
            task.count = durable_count;
            self.broadcast(&task);
            return;
        }
        self.broadcast(&task);
        tracing::info!(task = %id, count = task.count, "run succeeded");
    }

    async fn finish_with_error(&self, mut task: Task) {
        task.status = Status::Error;
        if let Err(e) = self.persist(&mut task).await {
            tracing::error!(task = %task.id, error = %e, "failed to persist error status");
        }
        self.broadcast(&task);
    }

    async fn persist(&self, task: &mut Task) -> Result<(), StoreError> {
        task.updated_at = Utc::now();
        self.store.save(task).await
    }

    fn broadcast(&self, task: &Task) {
        self.hub.broadcast(StatusMessage {
            id: task.id,
            status: task.status,
            count: task.count,
        });
    }
}

struct InFlightGuard {
    id: TaskId,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.id);
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
