// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command sequencing with persistent working-directory semantics

use crate::command::{run_command, CommandError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while replaying a command list
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("no such directory: {}", .0.display())]
    Directory(PathBuf),
}

/// Replay `commands` in order against a single evolving current directory.
///
/// A line starting with `cd ` updates the directory for every later command
/// in the list; relative targets resolve against the directory current at
/// that point, and a missing target aborts the sequence. Blank lines are
/// skipped. The first failure aborts the sequence; there is no notion of
/// partial success within a stage.
pub async fn run_sequence(commands: &[String], start_dir: &Path) -> Result<(), RunnerError> {
    let mut current = start_dir.to_path_buf();

    for raw in commands {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(target) = line.strip_prefix("cd ") {
            let target = target.trim();
            let dir = if Path::new(target).is_absolute() {
                PathBuf::from(target)
            } else {
                current.join(target)
            };
            if !dir.is_dir() {
                return Err(RunnerError::Directory(dir));
            }
            tracing::info!(dir = %dir.display(), "changing directory");
            current = dir;
            continue;
        }

        run_command(line, &current).await?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
