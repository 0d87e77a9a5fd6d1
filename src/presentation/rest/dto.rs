use serde::Serialize;
use serde_json::Value;

use crate::application::RouteOutcome;
use crate::domain::ExecutionOrder;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        ErrorResponse {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub pong: bool,
}

/// Response body for the webhook route, one shape per route outcome.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WebhookResponse {
    AltEntry {
        status: &'static str,
        order_type: String,
        has_trailing: bool,
        tp_payload: ExecutionOrder,
    },
    AltExit {
        status: &'static str,
        payload: Value,
    },
    Forwarded {
        status: &'static str,
        to: String,
    },
}

impl From<RouteOutcome> for WebhookResponse {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::AltEntry { order } => WebhookResponse::AltEntry {
                status: "alt_http_sent",
                order_type: order.order_type.clone(),
                has_trailing: order.has_trailing(),
                tp_payload: order,
            },
            RouteOutcome::AltExit { payload } => WebhookResponse::AltExit {
                status: "alt_http_sent",
                payload,
            },
            RouteOutcome::Forwarded { to } => WebhookResponse::Forwarded {
                status: "forwarded",
                to,
            },
        }
    }
}
