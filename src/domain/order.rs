use serde::Serialize;
use serde_json::{Number, Value};

use super::Action;

/// Initial stop attached to a trailing-stop order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopLoss {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: Number,
}

impl StopLoss {
    pub fn stop(amount: Number) -> Self {
        StopLoss {
            kind: "stop",
            amount,
        }
    }
}

/// Fully-specified order for the auto-trail execution endpoint.
///
/// Absent optional fields are omitted from the wire payload entirely
/// rather than sent as null: the downstream cannot price relative
/// levels without a reference price and rejects null placeholders.
/// Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionOrder {
    pub strategy_id: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Value>,
    pub ticker: String,
    #[serde(rename = "orderStrategyTypeId", skip_serializing_if = "Option::is_none")]
    pub order_strategy_type_id: Option<Value>,
    #[serde(rename = "quantityType")]
    pub quantity_type: &'static str,
    pub quantity: Number,
    #[serde(rename = "orderType")]
    pub order_type: String,
    #[serde(rename = "timeInForce")]
    pub time_in_force: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(rename = "stopLoss", skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<StopLoss>,
    #[serde(rename = "trailingStop", skip_serializing_if = "Option::is_none")]
    pub trailing_stop: Option<bool>,
    #[serde(rename = "trailPriceType", skip_serializing_if = "Option::is_none")]
    pub trail_price_type: Option<&'static str>,
    #[serde(rename = "trailAmount", skip_serializing_if = "Option::is_none")]
    pub trail_amount: Option<Number>,
    #[serde(rename = "triggerDistance", skip_serializing_if = "Option::is_none")]
    pub trigger_distance: Option<Number>,
}

impl ExecutionOrder {
    pub fn is_market(&self) -> bool {
        self.order_type == "market"
    }

    pub fn has_trailing(&self) -> bool {
        self.trailing_stop.is_some()
    }
}
