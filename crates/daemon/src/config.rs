// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: optional TOML settings resolved into concrete paths.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// User-facing settings file; every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory for the socket, PID file, log, and task store
    pub state_dir: Option<PathBuf>,
    /// Directory every run starts from
    pub base_dir: Option<PathBuf>,
    /// Ceiling on simultaneously running executions
    pub max_concurrent: Option<usize>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding everything the daemon writes
    pub state_dir: PathBuf,
    /// Directory every run starts from
    pub base_dir: PathBuf,
    /// Ceiling on simultaneously running executions
    pub max_concurrent: usize,
    /// Path to Unix socket
    pub socket_path: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to daemon log file
    pub log_path: PathBuf,
    /// Path to the JSON task store
    pub tasks_path: PathBuf,
}

impl Config {
    /// Resolve `settings` against a working directory.
    ///
    /// Relative paths in the settings are taken relative to `cwd`; the
    /// state directory defaults to `.slipway` under it.
    pub fn resolve(settings: &Settings, cwd: &Path) -> Self {
        let state_dir = match &settings.state_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join(".slipway"),
        };
        let base_dir = match &settings.base_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };

        Self {
            socket_path: state_dir.join("slipwayd.sock"),
            lock_path: state_dir.join("slipwayd.pid"),
            log_path: state_dir.join("slipwayd.log"),
            tasks_path: state_dir.join("tasks.json"),
            state_dir,
            base_dir,
            max_concurrent: settings.max_concurrent.unwrap_or(4),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
