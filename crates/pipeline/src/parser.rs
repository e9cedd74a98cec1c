// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML pipeline parsing

use crate::{DeployDef, PipelineDef};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during pipeline parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

// Raw shape before validation. Everything is optional here so that absence
// surfaces as MissingField rather than a serde type error.
#[derive(Debug, Deserialize)]
struct RawPipeline {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    build: Option<Vec<String>>,
    #[serde(default)]
    deploy: Option<RawDeploy>,
}

#[derive(Debug, Deserialize)]
struct RawDeploy {
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    run: Option<Vec<String>>,
}

/// Parse a pipeline definition from YAML content.
///
/// `build` may be absent or empty (a no-op build stage) and `deploy` is
/// optional, but a present deploy descriptor must name its platform.
pub fn parse_pipeline(content: &str) -> Result<PipelineDef, ParseError> {
    let raw: RawPipeline = serde_yml::from_str(content)?;

    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .ok_or(ParseError::MissingField("name"))?;

    let deploy = match raw.deploy {
        None => None,
        Some(d) => {
            let platform = d
                .platform
                .filter(|p| !p.is_empty())
                .ok_or(ParseError::MissingField("deploy.platform"))?;
            Some(DeployDef {
                platform,
                run: d.run.unwrap_or_default(),
            })
        }
    };

    Ok(PipelineDef {
        name,
        build: raw.build.unwrap_or_default(),
        deploy,
    })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
