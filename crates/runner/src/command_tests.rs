// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn captures_stdout() {
    let dir = tempdir().unwrap();
    let output = run_command("echo hello", dir.path()).await.unwrap();
    assert_eq!(output.trim(), "hello");
}

#[tokio::test]
async fn captures_combined_output() {
    let dir = tempdir().unwrap();
    let output = run_command("echo out; echo err >&2", dir.path())
        .await
        .unwrap();
    assert!(output.contains("out"));
    assert!(output.contains("err"));
}

#[tokio::test]
async fn runs_in_the_given_directory() {
    let dir = tempdir().unwrap();
    run_command("touch marker", dir.path()).await.unwrap();
    assert!(dir.path().join("marker").exists());
}

#[tokio::test]
async fn nonzero_exit_is_an_error_with_output() {
    let dir = tempdir().unwrap();
    let err = run_command("echo oops; exit 3", dir.path())
        .await
        .unwrap_err();
    match err {
        CommandError::Exited { code, output, .. } => {
            assert_eq!(code, 3);
            assert!(output.contains("oops"));
        }
        other => panic!("expected Exited, got {other:?}"),
    }
}

#[tokio::test]
async fn failing_builtin_reports_exit_code() {
    let dir = tempdir().unwrap();
    let err = run_command("false", dir.path()).await.unwrap_err();
    assert!(matches!(err, CommandError::Exited { code: 1, .. }));
}
