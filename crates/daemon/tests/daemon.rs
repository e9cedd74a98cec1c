// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process daemon integration tests
//!
//! Each test starts a full daemon against a temporary state directory and
//! talks to it over its Unix socket, exactly as an external client would.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;
use std::time::Duration;

use slipway_core::{Status, Task, TaskId};
use slipway_daemon::config::{Config, Settings};
use slipway_daemon::lifecycle;
use slipway_daemon::protocol::{self, Request, Response, DEFAULT_TIMEOUT, PROTOCOL_VERSION};
use slipway_storage::{JsonTaskStore, TaskStore};
use tokio::net::UnixStream;
use tokio::task::JoinHandle;

async fn spawn_daemon(dir: &Path, tasks: &[Task]) -> (Config, JoinHandle<()>) {
    let config = Config::resolve(&Settings::default(), dir);
    std::fs::create_dir_all(&config.state_dir).unwrap();

    // Seed the store the daemon will open
    let store = JsonTaskStore::open(&config.tasks_path).unwrap();
    for task in tasks {
        store.save(task).await.unwrap();
    }
    drop(store);

    let mut daemon = lifecycle::startup(&config).await.unwrap();
    let serving = tokio::spawn(async move {
        daemon.serve().await.unwrap();
        daemon.shutdown().unwrap();
    });

    (config, serving)
}

async fn send(config: &Config, request: &Request) -> Response {
    let stream = UnixStream::connect(&config.socket_path).await.unwrap();
    let (mut reader, mut writer) = stream.into_split();
    protocol::write_request(&mut writer, request, DEFAULT_TIMEOUT)
        .await
        .unwrap();
    protocol::read_response(&mut reader, DEFAULT_TIMEOUT)
        .await
        .unwrap()
}

async fn shutdown(config: &Config, serving: JoinHandle<()>) {
    assert_eq!(send(config, &Request::Shutdown).await, Response::ShuttingDown);
    tokio::time::timeout(Duration::from_secs(10), serving)
        .await
        .expect("daemon did not stop")
        .unwrap();
}

#[tokio::test]
async fn ping_and_hello() {
    let dir = tempfile::tempdir().unwrap();
    let (config, serving) = spawn_daemon(dir.path(), &[]).await;

    assert_eq!(send(&config, &Request::Ping).await, Response::Pong);
    assert_eq!(
        send(
            &config,
            &Request::Hello {
                version: "0".to_string()
            }
        )
        .await,
        Response::Hello {
            version: PROTOCOL_VERSION.to_string()
        }
    );

    shutdown(&config, serving).await;
}

#[tokio::test]
async fn execute_runs_a_task_and_watch_streams_its_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let task = Task::new(1, "build", "name: build\nbuild:\n  - echo built\n");
    let (config, serving) = spawn_daemon(dir.path(), &[task]).await;

    // Open the watch connection first so it sees the whole run
    let watch = UnixStream::connect(&config.socket_path).await.unwrap();
    let (mut watch_reader, mut watch_writer) = watch.into_split();
    protocol::write_request(&mut watch_writer, &Request::Watch, DEFAULT_TIMEOUT)
        .await
        .unwrap();
    assert_eq!(
        protocol::read_response(&mut watch_reader, DEFAULT_TIMEOUT)
            .await
            .unwrap(),
        Response::Ok
    );

    assert_eq!(
        send(&config, &Request::Execute { id: TaskId(1) }).await,
        Response::Ok
    );

    let first = protocol::read_response(&mut watch_reader, DEFAULT_TIMEOUT)
        .await
        .unwrap();
    assert_eq!(
        first,
        Response::Update {
            id: TaskId(1),
            status: Status::Running,
            count: 0
        }
    );

    let second = protocol::read_response(&mut watch_reader, DEFAULT_TIMEOUT)
        .await
        .unwrap();
    assert_eq!(
        second,
        Response::Update {
            id: TaskId(1),
            status: Status::Success,
            count: 1
        }
    );

    // The run's outcome survives in the store the daemon writes
    drop(watch_reader);
    drop(watch_writer);
    shutdown(&config, serving).await;

    let store = JsonTaskStore::open(&config.tasks_path).unwrap();
    let task = store.get(TaskId(1)).await.unwrap();
    assert_eq!(task.status, Status::Success);
    assert_eq!(task.count, 1);
}

#[tokio::test]
async fn execute_of_an_unknown_task_is_an_error_response() {
    let dir = tempfile::tempdir().unwrap();
    let (config, serving) = spawn_daemon(dir.path(), &[]).await;

    match send(&config, &Request::Execute { id: TaskId(42) }).await {
        Response::Error { message } => assert!(message.contains("42"), "message: {message}"),
        other => panic!("expected an error response, got {other:?}"),
    }

    shutdown(&config, serving).await;
}

#[tokio::test]
async fn status_reports_tasks_and_watchers() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = [
        Task::new(1, "a", "name: a\n"),
        Task::new(2, "b", "name: b\n"),
    ];
    let (config, serving) = spawn_daemon(dir.path(), &tasks).await;

    let watch = UnixStream::connect(&config.socket_path).await.unwrap();
    let (mut watch_reader, mut watch_writer) = watch.into_split();
    protocol::write_request(&mut watch_writer, &Request::Watch, DEFAULT_TIMEOUT)
        .await
        .unwrap();
    assert_eq!(
        protocol::read_response(&mut watch_reader, DEFAULT_TIMEOUT)
            .await
            .unwrap(),
        Response::Ok
    );

    match send(&config, &Request::Status).await {
        Response::Status {
            tasks,
            running,
            watchers,
            ..
        } => {
            assert_eq!(tasks, 2);
            assert_eq!(running, 0);
            assert_eq!(watchers, 1);
        }
        other => panic!("expected a status response, got {other:?}"),
    }

    drop(watch_reader);
    drop(watch_writer);
    shutdown(&config, serving).await;
}

#[tokio::test]
async fn second_daemon_on_the_same_state_dir_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let (config, serving) = spawn_daemon(dir.path(), &[]).await;

    match lifecycle::startup(&config).await {
        Err(lifecycle::LifecycleError::LockFailed(_)) => {}
        Ok(_) => panic!("second daemon should not start"),
        Err(other) => panic!("expected a lock failure, got {other}"),
    }

    shutdown(&config, serving).await;
}
