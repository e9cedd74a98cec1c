// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const SAMPLE_PIPELINE: &str = r#"
name: web-release
build:
  - npm install
  - npm run build
  - cd dist
  - tar czf ../release.tar.gz .
deploy:
  platform: k8s
  run:
    - kubectl apply -f deploy.yaml
    - kubectl rollout status deploy/web
"#;

#[test]
fn parse_full_pipeline() {
    let def = parse_pipeline(SAMPLE_PIPELINE).unwrap();

    assert_eq!(def.name, "web-release");
    assert_eq!(def.build.len(), 4);
    assert_eq!(def.build[0], "npm install");
    assert_eq!(def.build[2], "cd dist");

    let deploy = def.deploy.as_ref().unwrap();
    assert_eq!(deploy.platform, "k8s");
    assert_eq!(deploy.run.len(), 2);
    assert_eq!(deploy.run[0], "kubectl apply -f deploy.yaml");
    assert!(def.has_deploy_commands());
}

#[test]
fn build_order_is_preserved() {
    let def = parse_pipeline(SAMPLE_PIPELINE).unwrap();
    let expected = [
        "npm install",
        "npm run build",
        "cd dist",
        "tar czf ../release.tar.gz .",
    ];
    assert_eq!(def.build, expected);
}

#[test]
fn parsing_is_deterministic() {
    let first = parse_pipeline(SAMPLE_PIPELINE).unwrap();
    let second = parse_pipeline(SAMPLE_PIPELINE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn deploy_is_optional() {
    let def = parse_pipeline("name: lib\nbuild:\n  - make\n").unwrap();
    assert_eq!(def.name, "lib");
    assert!(def.deploy.is_none());
    assert!(!def.has_deploy_commands());
}

#[test]
fn absent_build_is_a_noop_stage() {
    let def = parse_pipeline("name: empty\n").unwrap();
    assert!(def.build.is_empty());
    assert!(def.deploy.is_none());
}

#[test]
fn deploy_without_run_commands_is_noop() {
    let def = parse_pipeline("name: t\ndeploy:\n  platform: vm\n").unwrap();
    let deploy = def.deploy.as_ref().unwrap();
    assert_eq!(deploy.platform, "vm");
    assert!(deploy.run.is_empty());
    assert!(!def.has_deploy_commands());
}

#[test]
fn missing_name_fails() {
    let err = parse_pipeline("build:\n  - make\n").unwrap_err();
    assert!(matches!(err, ParseError::MissingField("name")));
}

#[test]
fn deploy_without_platform_fails() {
    let err = parse_pipeline("name: t\ndeploy:\n  run:\n    - ship\n").unwrap_err();
    assert!(matches!(err, ParseError::MissingField("deploy.platform")));
}

#[test]
fn wrong_build_type_fails() {
    // build must be a list of strings, not a scalar
    assert!(matches!(
        parse_pipeline("name: t\nbuild: make\n"),
        Err(ParseError::Yaml(_))
    ));
}

#[test]
fn malformed_yaml_fails() {
    assert!(matches!(
        parse_pipeline("name: [unclosed\n"),
        Err(ParseError::Yaml(_))
    ));
}

#[test]
fn definition_serializes_for_storage() {
    let def = parse_pipeline(SAMPLE_PIPELINE).unwrap();
    let value = serde_json::to_value(&def).unwrap();
    assert_eq!(value["name"], "web-release");
    assert_eq!(value["deploy"]["platform"], "k8s");

    let back: PipelineDef = serde_json::from_value(value).unwrap();
    assert_eq!(back, def);
}
