use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::application::ports::{ForwardError, SignalForwarder};

/// Reqwest-backed forwarder for downstream execution endpoints.
///
/// No retries and no gateway-level timeout: a single POST per call,
/// with failure surfaced to the caller.
#[derive(Clone, Default)]
pub struct HttpForwarder {
    client: Client,
}

impl HttpForwarder {
    pub fn new() -> Self {
        HttpForwarder {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        HttpForwarder { client }
    }
}

#[async_trait]
impl SignalForwarder for HttpForwarder {
    async fn send(&self, endpoint: Option<&str>, payload: &Value) -> Result<u16, ForwardError> {
        let url = endpoint
            .filter(|u| !u.is_empty())
            .ok_or(ForwardError::EndpointUnconfigured)?;

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "downstream rejected forward");
            return Err(ForwardError::UpstreamRejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(%url, status = status.as_u16(), "forwarded payload");
        Ok(status.as_u16())
    }
}
