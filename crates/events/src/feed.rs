//! In-process change feed backed by a `tokio::sync::broadcast` channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::catalog::{ChangeKind, Collection};
use folio_db::ChangeHook;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// A write landed on a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    /// When the feed learned about the change.
    pub at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(collection: Collection, kind: ChangeKind) -> Self {
        Self {
            collection,
            kind,
            at: Utc::now(),
        }
    }

    /// Parse a notification payload of the form `table` or `table:op`.
    ///
    /// Returns `None` for tables that are not content collections. An
    /// unrecognised operation reads as [`ChangeKind::Unknown`].
    pub fn from_payload(payload: &str) -> Option<Self> {
        let (table, op) = match payload.split_once(':') {
            Some((table, op)) => (table, Some(op)),
            None => (payload, None),
        };
        let collection = table.trim().parse::<Collection>().ok()?;
        let kind = op
            .and_then(|op| op.trim().parse::<ChangeKind>().ok())
            .unwrap_or(ChangeKind::Unknown);
        Some(Self::new(collection, kind))
    }
}

// ---------------------------------------------------------------------------
// ChangeFeed
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out hub for [`ChangeEvent`]s, shared as `Arc<ChangeFeed>`.
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// When the buffer is full the oldest events are dropped and slow
    /// subscribers observe a lag.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Deliver an event to every current subscriber.
    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            collection = %event.collection,
            kind = ?event.kind,
            "Content change"
        );
        // A send error only means nobody is listening.
        let _ = self.sender.send(event);
    }

    /// Raw receiver for every event on every collection.
    pub fn receiver(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Run `on_change` each time `collection` changes.
    ///
    /// Each call spawns its own task, so any number of subscriptions to the
    /// same collection coexist and are cancelled independently. A lagged
    /// subscriber gets a single callback, since it has to re-read anyway.
    /// Must be called from within a Tokio runtime.
    pub fn subscribe<F>(&self, collection: Collection, on_change: F) -> SubscriptionHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut receiver = self.sender.subscribe();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    received = receiver.recv() => match received {
                        Ok(event) if event.collection == collection => on_change(),
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(%collection, skipped, "Change subscriber lagged");
                            on_change();
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });

        tracing::debug!(%collection, "Subscribed to changes");
        SubscriptionHandle {
            collection,
            cancel,
            task,
        }
    }

    /// Number of live receivers, callback subscriptions included.
    ///
    /// A cancelled subscription stops counting once its task has exited.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Cancel a subscription. Equivalent to dropping the handle.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        tracing::debug!(collection = %handle.collection, "Unsubscribed from changes");
        drop(handle);
    }

    /// Adapter for stores that report writes through a plain callback.
    pub fn as_hook(self: &Arc<Self>) -> ChangeHook {
        let feed = Arc::clone(self);
        Arc::new(move |collection, kind| feed.publish(ChangeEvent::new(collection, kind)))
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Live subscription created by [`ChangeFeed::subscribe`].
pub struct SubscriptionHandle {
    collection: Collection,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// `false` once cancelled or once the feed has shut down.
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && !self.task.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
