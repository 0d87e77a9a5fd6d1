use async_trait::async_trait;
use serde_json::Value;

/// Best-effort fan-out of accepted signals to live push subscribers.
///
/// Publishing never fails from the caller's point of view: delivery
/// problems are resolved inside the implementation (by dropping the
/// affected subscriber) and are unobservable to the submitter.
#[async_trait]
pub trait SignalPublisher: Send + Sync {
    /// Push a document to every live subscriber.
    async fn publish(&self, document: &Value);

    /// Number of currently registered subscribers.
    fn subscriber_count(&self) -> usize;
}
