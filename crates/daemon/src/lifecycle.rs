// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, the accept loop, shutdown.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use fs2::FileExt;
use slipway_engine::{Supervisor, SupervisorConfig};
use slipway_hub::StatusHub;
use slipway_storage::{JsonTaskStore, StoreError, TaskStore};
use thiserror::Error;
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::server::{self, DaemonHandle};

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("failed to bind socket at {0}: {1}")]
    BindFailed(PathBuf, std::io::Error),

    #[error("task store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A running daemon: the listener plus the shared handle connections use
pub struct Daemon {
    /// Configuration
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Unix socket listener
    pub listener: UnixListener,
    /// Shared state handed to every connection
    pub handle: DaemonHandle,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Start the daemon
pub async fn startup(config: &Config) -> Result<Daemon, LifecycleError> {
    match startup_inner(config).await {
        Ok(daemon) => Ok(daemon),
        // The socket and PID file belong to the daemon holding the lock;
        // leave them alone
        Err(e @ LifecycleError::LockFailed(_)) => Err(e),
        Err(e) => {
            // Clean up any resources created before failure
            cleanup_on_failure(config);
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<Daemon, LifecycleError> {
    std::fs::create_dir_all(&config.state_dir)?;

    // Acquire the lock file first; prevents two daemons racing on startup.
    // Opened without truncation so a lock failure leaves the owner's PID
    // intact.
    let mut lock_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&config.lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(LifecycleError::LockFailed)?;

    use std::io::Write;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;

    // Open the task store before binding; never accept connections against
    // a store that failed to load
    let store = Arc::new(JsonTaskStore::open(&config.tasks_path)?);
    let loaded = store.list().await?;
    info!(tasks = loaded.len(), "loaded task store");

    let hub = StatusHub::new();
    let supervisor = Supervisor::new(
        Arc::clone(&store),
        hub.clone(),
        SupervisorConfig {
            max_concurrent: config.max_concurrent,
            base_dir: config.base_dir.clone(),
        },
    );

    // Remove a stale socket and bind last, once everything else is ready
    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| LifecycleError::BindFailed(config.socket_path.clone(), e))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

    info!(socket = %config.socket_path.display(), "daemon started");

    Ok(Daemon {
        config: config.clone(),
        lock_file,
        listener,
        handle: DaemonHandle::new(store, hub, supervisor, Instant::now(), shutdown_tx),
        shutdown_rx,
    })
}

impl Daemon {
    /// Accept connections until a shutdown request arrives.
    ///
    /// Each connection runs in its own task, so a slow or watching client
    /// never blocks the accept loop.
    pub async fn serve(&mut self) -> Result<(), LifecycleError> {
        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, _)) => {
                            let handle = self.handle.clone();
                            tokio::spawn(async move {
                                if let Err(e) = server::handle_connection(handle, stream).await {
                                    error!("Error handling connection: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Error accepting connection: {}", e);
                        }
                    }
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown requested via IPC");
                    return Ok(());
                }
            }
        }
    }

    /// Shutdown the daemon gracefully
    pub fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        if self.config.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.socket_path) {
                warn!("Failed to remove socket file: {}", e);
            }
        }

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // Lock file is released automatically when self.lock_file is dropped

        info!("Daemon shutdown complete");
        Ok(())
    }
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}
