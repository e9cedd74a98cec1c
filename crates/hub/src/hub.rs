// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status hub actor

use slipway_core::StatusMessage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Handle for unsubscribing a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

enum HubCommand {
    Subscribe {
        id: SubscriberId,
        sender: mpsc::UnboundedSender<StatusMessage>,
    },
    Unsubscribe {
        id: SubscriberId,
    },
    Broadcast {
        message: StatusMessage,
    },
    Count {
        reply: oneshot::Sender<usize>,
    },
}

/// Cloneable handle to the hub's owner task.
///
/// The owner task exits once every handle has been dropped.
#[derive(Clone)]
pub struct StatusHub {
    commands: mpsc::UnboundedSender<HubCommand>,
    next_id: Arc<AtomicU64>,
}

/// A live subscription; messages arrive in broadcast order.
///
/// Dropping the receiver unregisters the connection on its next delivery.
pub struct StatusReceiver {
    id: SubscriberId,
    receiver: mpsc::UnboundedReceiver<StatusMessage>,
}

impl StatusReceiver {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next broadcast; `None` once the hub is gone
    pub async fn recv(&mut self) -> Option<StatusMessage> {
        self.receiver.recv().await
    }

    /// Take a delivered message without waiting
    pub fn try_recv(&mut self) -> Option<StatusMessage> {
        self.receiver.try_recv().ok()
    }
}

impl StatusHub {
    /// Create a hub and spawn its owner task (requires a tokio runtime)
    pub fn new() -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        tokio::spawn(run_hub(inbox));
        Self {
            commands,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a new connection
    pub fn subscribe(&self) -> StatusReceiver {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();
        let _ = self.commands.send(HubCommand::Subscribe { id, sender });
        StatusReceiver { id, receiver }
    }

    /// Remove a connection; a no-op if it is already gone
    pub fn unsubscribe(&self, id: SubscriberId) {
        let _ = self.commands.send(HubCommand::Unsubscribe { id });
    }

    /// Deliver `message` to every currently registered connection.
    ///
    /// Fire-and-forget per connection: a failed delivery unregisters that
    /// connection and delivery continues to the rest.
    pub fn broadcast(&self, message: StatusMessage) {
        let _ = self.commands.send(HubCommand::Broadcast { message });
    }

    /// Number of registered connections, once pending commands have drained
    pub async fn subscriber_count(&self) -> usize {
        let (reply, count) = oneshot::channel();
        if self.commands.send(HubCommand::Count { reply }).is_err() {
            return 0;
        }
        count.await.unwrap_or(0)
    }
}

impl Default for StatusHub {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_hub(mut inbox: mpsc::UnboundedReceiver<HubCommand>) {
    let mut subscribers: HashMap<SubscriberId, mpsc::UnboundedSender<StatusMessage>> =
        HashMap::new();

    while let Some(command) = inbox.recv().await {
        match command {
            HubCommand::Subscribe { id, sender } => {
                subscribers.insert(id, sender);
            }
            HubCommand::Unsubscribe { id } => {
                subscribers.remove(&id);
            }
            HubCommand::Broadcast { message } => {
                subscribers.retain(|id, sender| {
                    if sender.send(message.clone()).is_ok() {
                        true
                    } else {
                        tracing::debug!(subscriber = id.0, "dropping disconnected subscriber");
                        false
                    }
                });
                tracing::info!(
                    task = %message.id,
                    status = %message.status,
                    count = message.count,
                    subscribers = subscribers.len(),
                    "broadcast status"
                );
            }
            HubCommand::Count { reply } => {
                let _ = reply.send(subscribers.len());
            }
        }
    }
}

#[cfg(test)]
#[path = "hub_tests.rs"]
mod tests;
