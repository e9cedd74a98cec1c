// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Task persistence
//!
//! The `TaskStore` trait is the persistence boundary the execution engine
//! talks to; `JsonTaskStore` is the file-backed implementation the daemon
//! uses. Fake stores for exercising degraded paths live behind the
//! `test-support` feature.

mod json;
mod store;

pub use json::JsonTaskStore;
pub use store::{StoreError, TaskStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FailingTaskStore, MemoryTaskStore};
