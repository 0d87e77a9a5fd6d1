use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForwardError {
    #[error("No endpoint configured for the selected route")]
    EndpointUnconfigured,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Upstream rejected with status {status}")]
    UpstreamRejected { status: u16 },
}

/// Delivers a JSON document to a downstream execution endpoint.
///
/// One attempt per call; the caller decides how to surface failure.
#[async_trait]
pub trait SignalForwarder: Send + Sync {
    /// Post `payload` to `endpoint` and return the response status code.
    /// An absent or empty endpoint is `EndpointUnconfigured`.
    async fn send(&self, endpoint: Option<&str>, payload: &Value) -> Result<u16, ForwardError>;
}
