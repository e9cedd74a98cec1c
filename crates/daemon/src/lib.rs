// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slipway daemon library
//!
//! Exposes the daemon's building blocks so integration tests and tooling
//! can drive a daemon in-process; the `slipwayd` binary is a thin wrapper
//! around [`lifecycle::startup`] and [`lifecycle::Daemon::serve`].

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod lifecycle;
pub mod protocol;
pub mod server;
