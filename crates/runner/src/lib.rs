// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shell command execution for pipeline stages
//!
//! Each command is spawned as a fresh `sh -c` invocation, so directory
//! state cannot live in a shell process; the sequencer tracks the current
//! directory itself and re-applies it to every spawn.

mod command;
mod sequence;

pub use command::{run_command, CommandError};
pub use sequence::{run_sequence, RunnerError};
