// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed pipeline definitions

use serde::{Deserialize, Serialize};

/// Optional deploy stage: a target platform plus its run commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployDef {
    pub platform: String,
    /// Ordered deploy commands; empty means a no-op deploy stage
    #[serde(default)]
    pub run: Vec<String>,
}

/// A pipeline definition, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDef {
    pub name: String,
    /// Ordered build commands; empty means a no-op build stage
    #[serde(default)]
    pub build: Vec<String>,
    #[serde(default)]
    pub deploy: Option<DeployDef>,
}

impl PipelineDef {
    /// Whether a deploy stage exists and carries commands to run
    pub fn has_deploy_commands(&self) -> bool {
        self.deploy.as_ref().is_some_and(|d| !d.run.is_empty())
    }
}
