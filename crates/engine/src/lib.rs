// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Slipway execution engine
//!
//! The supervisor owns the run lifecycle: it loads a task, launches its
//! execution in the background, drives the status state machine, persists
//! every transition, and broadcasts each one only after it is durably
//! stored.

mod supervisor;

pub use supervisor::{ExecuteError, Supervisor, SupervisorConfig};
