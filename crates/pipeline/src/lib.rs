// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pipeline definition parsing
//!
//! Turns a textual pipeline definition into an ordered build command list
//! and an optional deploy descriptor. Parsing is pure: same text, same
//! structure, no side effects.

mod definition;
mod parser;

pub use definition::{DeployDef, PipelineDef};
pub use parser::{parse_pipeline, ParseError};
