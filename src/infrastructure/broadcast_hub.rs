use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

use crate::application::ports::SignalPublisher;

const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Registry of live push subscribers.
///
/// Each subscriber owns a bounded outbound queue; the transport layer
/// pumps it into the socket. The set is self-healing: any delivery
/// failure removes the subscriber, and a connection that cannot keep
/// up with its queue is treated the same as a dead one. There is no
/// explicit health check.
pub struct BroadcastHub {
    subscribers: DashMap<u64, mpsc::Sender<String>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl BroadcastHub {
    pub fn new(capacity: usize) -> Self {
        BroadcastHub {
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(0),
            capacity,
        }
    }

    /// Add a subscriber and return its id plus the receiving end of its
    /// outbound queue.
    pub fn register(&self) -> (u64, mpsc::Receiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.capacity);
        self.subscribers.insert(id, tx);
        (id, rx)
    }

    /// Remove a subscriber. Idempotent.
    pub fn unregister(&self, id: u64) {
        self.subscribers.remove(&id);
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

#[async_trait]
impl SignalPublisher for BroadcastHub {
    async fn publish(&self, document: &Value) {
        let text = document.to_string();

        // Snapshot the registry so a concurrent connect or disconnect
        // cannot corrupt the iteration.
        let targets: Vec<(u64, mpsc::Sender<String>)> = self
            .subscribers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, tx) in targets {
            if tx.try_send(text.clone()).is_err() {
                self.subscribers.remove(&id);
                tracing::debug!(subscriber = id, "dropped push subscriber");
            }
        }
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
