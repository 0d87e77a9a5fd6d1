use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{ForwardError, SignalForwarder, SignalPublisher};
use crate::domain::{BuildError, ExecutionOrder, NormalizedSignal, OrderBuilder, SignalError};

/// Static routing table: strategy key -> downstream endpoint.
///
/// A missing URL is not a configuration failure at startup; selecting
/// that route surfaces `EndpointUnconfigured` on the request instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default = "default_alt_key")]
    pub alt_key: String,
    #[serde(default)]
    pub alt_url: Option<String>,
    #[serde(default = "default_core_key")]
    pub core_key: String,
    #[serde(default)]
    pub core_url: Option<String>,
    #[serde(default = "default_runner_key")]
    pub runner_key: String,
    #[serde(default)]
    pub runner_url: Option<String>,
}

fn default_alt_key() -> String {
    "Tiger-Alt".to_string()
}

fn default_core_key() -> String {
    "Tiger-Core".to_string()
}

fn default_runner_key() -> String {
    "Tiger-Runner".to_string()
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable {
            alt_key: default_alt_key(),
            alt_url: None,
            core_key: default_core_key(),
            core_url: None,
            runner_key: default_runner_key(),
            runner_url: None,
        }
    }
}

/// What happened to an accepted signal.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// Auto-trail entry: a rebuilt strict order went to the alt endpoint.
    AltEntry { order: ExecutionOrder },
    /// Auto-trail exit: the original document went to the alt endpoint,
    /// with a best-effort price backfill.
    AltExit { payload: Value },
    /// Pass-through forward to the core or runner endpoint.
    Forwarded { to: String },
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error(transparent)]
    InvalidSignal(#[from] SignalError),
    #[error("Unknown strategy_id: {0}")]
    UnknownRoute(String),
    #[error("Malformed bracket data: {0}")]
    InvalidOrderFields(#[from] BuildError),
    #[error(transparent)]
    Forward(#[from] ForwardError),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Normalizes an inbound document, mirrors it to push subscribers, and
/// dispatches it to the downstream endpoint its routing key selects.
pub struct RouteSignalUseCase<F, P>
where
    F: SignalForwarder,
    P: SignalPublisher + 'static,
{
    routes: RouteTable,
    forwarder: Arc<F>,
    publisher: Arc<P>,
}

impl<F, P> RouteSignalUseCase<F, P>
where
    F: SignalForwarder,
    P: SignalPublisher + 'static,
{
    pub fn new(routes: RouteTable, forwarder: Arc<F>, publisher: Arc<P>) -> Self {
        Self {
            routes,
            forwarder,
            publisher,
        }
    }

    pub async fn execute(&self, document: Value) -> Result<RouteOutcome, RouteError> {
        let signal = NormalizedSignal::from_document(document)?;

        tracing::debug!(
            strategy_id = signal.strategy_id(),
            action = %signal.action(),
            ticker = signal.ticker(),
            "received signal"
        );

        // Mirror to subscribers exactly once, fire-and-forget: the
        // routing response never waits on fan-out, and fan-out failures
        // are unobservable here.
        let publisher = Arc::clone(&self.publisher);
        let mirrored = signal.document().clone();
        tokio::spawn(async move {
            publisher.publish(&mirrored).await;
        });

        if signal.strategy_id() == self.routes.alt_key {
            return self.route_alt(&signal).await;
        }

        let (to, endpoint) = if signal.strategy_id() == self.routes.core_key {
            (&self.routes.core_key, self.routes.core_url.as_deref())
        } else if signal.strategy_id() == self.routes.runner_key {
            (&self.routes.runner_key, self.routes.runner_url.as_deref())
        } else {
            return Err(RouteError::UnknownRoute(signal.strategy_id().to_string()));
        };

        let status = self.forwarder.send(endpoint, signal.document()).await?;
        tracing::info!(to, status, "forwarded signal");

        Ok(RouteOutcome::Forwarded { to: to.clone() })
    }

    async fn route_alt(&self, signal: &NormalizedSignal) -> Result<RouteOutcome, RouteError> {
        let endpoint = self.routes.alt_url.as_deref();

        if signal.action().is_entry() {
            let order = OrderBuilder::build(signal)?;
            let payload = serde_json::to_value(&order)
                .map_err(|e| RouteError::Internal(e.to_string()))?;

            self.forwarder.send(endpoint, &payload).await?;
            tracing::info!(
                order_type = order.order_type,
                has_trailing = order.has_trailing(),
                "sent auto-trail entry"
            );

            return Ok(RouteOutcome::AltEntry { order });
        }

        let payload = signal.document_with_price();
        self.forwarder.send(endpoint, &payload).await?;
        tracing::info!(ticker = signal.ticker(), "sent auto-trail exit");

        Ok(RouteOutcome::AltExit { payload })
    }
}
