// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

fn commands(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn empty_sequence_is_ok() {
    let dir = tempdir().unwrap();
    run_sequence(&[], dir.path()).await.unwrap();
}

#[tokio::test]
async fn blank_lines_are_skipped() {
    let dir = tempdir().unwrap();
    run_sequence(&commands(&["", "  ", "touch here"]), dir.path())
        .await
        .unwrap();
    assert!(dir.path().join("here").exists());
}

#[tokio::test]
async fn cd_persists_across_commands() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    run_sequence(
        &commands(&["cd sub", "touch first", "touch second"]),
        dir.path(),
    )
    .await
    .unwrap();

    assert!(dir.path().join("sub/first").exists());
    assert!(dir.path().join("sub/second").exists());
    assert!(!dir.path().join("first").exists());
}

#[tokio::test]
async fn relative_cd_resolves_against_current_directory() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("a/b")).unwrap();

    run_sequence(
        &commands(&["cd a", "cd b", "touch deep"]),
        dir.path(),
    )
    .await
    .unwrap();

    assert!(dir.path().join("a/b/deep").exists());
}

#[tokio::test]
async fn absolute_cd_ignores_current_directory() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();
    let line = format!("cd {}", other.path().display());

    run_sequence(&commands(&[line.as_str(), "touch there"]), dir.path())
        .await
        .unwrap();

    assert!(other.path().join("there").exists());
}

#[tokio::test]
async fn missing_cd_target_aborts_before_later_commands() {
    let dir = tempdir().unwrap();
    let err = run_sequence(
        &commands(&["cd nonexistent", "touch never"]),
        dir.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunnerError::Directory(_)));
    assert!(!dir.path().join("never").exists());
}

#[tokio::test]
async fn first_command_failure_stops_the_sequence() {
    let dir = tempdir().unwrap();
    let err = run_sequence(&commands(&["false", "touch never"]), dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::Command(_)));
    assert!(!dir.path().join("never").exists());
}
