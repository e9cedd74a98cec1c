// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! slipway-core: shared domain types for the slipway pipeline runner
//!
//! This crate holds the task entity, its status lifecycle, and the wire
//! message broadcast on every status transition. No I/O lives here.

pub mod status;
pub mod task;

pub use status::{Status, StatusMessage};
pub use task::{Task, TaskId};
