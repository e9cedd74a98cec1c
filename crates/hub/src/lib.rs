// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! In-memory status broadcaster
//!
//! A single owner task serializes subscribe/unsubscribe/broadcast, so
//! registry mutation never races a delivery pass and every connection sees
//! messages in broadcast order. The hub keeps no history: a late subscriber
//! receives nothing retroactively.

mod hub;

pub use hub::{StatusHub, StatusReceiver, SubscriberId};
