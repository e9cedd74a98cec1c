// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Socket server and connection handling.

use std::sync::Arc;
use std::time::Instant;

use slipway_engine::Supervisor;
use slipway_hub::StatusHub;
use slipway_storage::{JsonTaskStore, TaskStore};
use tokio::io::AsyncReadExt;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::protocol::{
    self, Request, Response, DEFAULT_TIMEOUT, PROTOCOL_VERSION,
};

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Request timeout")]
    Timeout,
}

/// Shared daemon state, cloned into every connection task
#[derive(Clone)]
pub struct DaemonHandle {
    store: Arc<JsonTaskStore>,
    hub: StatusHub,
    supervisor: Supervisor<JsonTaskStore>,
    start_time: Instant,
    shutdown: mpsc::Sender<()>,
}

impl DaemonHandle {
    pub fn new(
        store: Arc<JsonTaskStore>,
        hub: StatusHub,
        supervisor: Supervisor<JsonTaskStore>,
        start_time: Instant,
        shutdown: mpsc::Sender<()>,
    ) -> Self {
        Self {
            store,
            hub,
            supervisor,
            start_time,
            shutdown,
        }
    }
}

/// Handle a single client connection
pub async fn handle_connection(
    handle: DaemonHandle,
    stream: UnixStream,
) -> Result<(), ServerError> {
    let (mut reader, mut writer) = stream.into_split();

    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(protocol::ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    // Watch upgrades the connection to a status stream; everything else is
    // a single request/response exchange
    if request == Request::Watch {
        return handle_watch(handle, reader, writer).await;
    }

    let response = handle_request(&handle, request).await;

    debug!("Sending response: {:?}", response);

    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    Ok(())
}

/// Handle a single request and return a response
async fn handle_request(handle: &DaemonHandle, request: Request) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => Response::Hello {
            version: PROTOCOL_VERSION.to_string(),
        },

        Request::Execute { id } => match handle.supervisor.execute(id).await {
            Ok(()) => Response::Ok,
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        },

        Request::Status => {
            let uptime_secs = handle.start_time.elapsed().as_secs();
            let tasks = match handle.store.list().await {
                Ok(tasks) => tasks.len(),
                Err(e) => {
                    return Response::Error {
                        message: e.to_string(),
                    }
                }
            };

            Response::Status {
                uptime_secs,
                tasks,
                running: handle.supervisor.in_flight(),
                watchers: handle.hub.subscriber_count().await,
            }
        }

        Request::Shutdown => {
            let _ = handle.shutdown.send(()).await;
            Response::ShuttingDown
        }

        // Intercepted in handle_connection before dispatch
        Request::Watch => Response::Ok,
    }
}

/// Stream status updates to a watch connection until it goes away
async fn handle_watch(
    handle: DaemonHandle,
    mut reader: OwnedReadHalf,
    mut writer: OwnedWriteHalf,
) -> Result<(), ServerError> {
    let mut receiver = handle.hub.subscribe();
    info!(subscriber = ?receiver.id(), "watch connection opened");

    // Ack after subscribing, so the client knows it will see every
    // broadcast from this point on
    protocol::write_response(&mut writer, &Response::Ok, DEFAULT_TIMEOUT)
        .await
        .map_err(ServerError::Protocol)?;

    let mut probe = [0u8; 64];
    loop {
        tokio::select! {
            message = receiver.recv() => {
                let Some(message) = message else { break };
                let update = Response::from(message);
                if let Err(e) = protocol::write_response(&mut writer, &update, DEFAULT_TIMEOUT).await {
                    debug!("Watch write failed, dropping subscriber: {}", e);
                    break;
                }
            }

            // Watch clients send nothing after the request; a read of zero
            // bytes means they hung up
            read = reader.read(&mut probe) => {
                match read {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        }
    }

    handle.hub.unsubscribe(receiver.id());
    info!(subscriber = ?receiver.id(), "watch connection closed");
    Ok(())
}
