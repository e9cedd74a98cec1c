// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single shell command execution

use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure of one shell command; carries the captured combined output
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("command `{command}` exited with code {code}")]
    Exited {
        command: String,
        /// Exit code, or -1 if terminated by a signal
        code: i32,
        output: String,
    },
}

/// Run one command through the host shell, waiting for completion and
/// capturing combined stdout/stderr.
///
/// No timeout is enforced: a hung command hangs the caller.
pub async fn run_command(command: &str, cwd: &Path) -> Result<String, CommandError> {
    tracing::info!(command, cwd = %cwd.display(), "running command");

    let output = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            source: e,
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if output.status.success() {
        if !combined.is_empty() {
            tracing::info!(command, output = %combined, "command output");
        }
        Ok(combined)
    } else {
        let code = output.status.code().unwrap_or(-1);
        tracing::error!(command, code, output = %combined, "command failed");
        Err(CommandError::Exited {
            command: command.to_string(),
            code,
            output: combined,
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
