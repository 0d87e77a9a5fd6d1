use serde_json::{Number, Value};
use thiserror::Error;

use super::fallback;
use super::Action;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Missing or invalid strategy_id/action/ticker")]
    MissingRoutingFields,
}

/// A validated inbound trading signal.
///
/// The routing fields are typed and guaranteed present; everything else
/// stays inside the original document so pass-through routes forward
/// the payload exactly as it arrived. Optional order fields resolve
/// lazily through the [`fallback`] tables.
#[derive(Debug, Clone)]
pub struct NormalizedSignal {
    strategy_id: String,
    action: Action,
    ticker: String,
    document: Value,
}

impl NormalizedSignal {
    /// Validate the routing fields of a parsed document.
    ///
    /// `action` is matched case-insensitively; anything outside
    /// {buy, sell, exit} is a rejection, never a default.
    pub fn from_document(document: Value) -> Result<Self, SignalError> {
        let strategy_id = document
            .get("strategy_id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let ticker = document
            .get("ticker")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let action_raw = document
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if strategy_id.is_empty() || ticker.is_empty() {
            return Err(SignalError::MissingRoutingFields);
        }
        let action =
            Action::try_from(action_raw).map_err(|_| SignalError::MissingRoutingFields)?;

        Ok(NormalizedSignal {
            strategy_id: strategy_id.to_string(),
            action,
            ticker: ticker.to_string(),
            document,
        })
    }

    pub fn strategy_id(&self) -> &str {
        &self.strategy_id
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The original parsed document, unmodified.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn quantity(&self) -> Option<Number> {
        let number = self.document.get("quantity")?.as_number()?;
        if number.as_f64()? == 0.0 {
            return None;
        }
        Some(number.clone())
    }

    pub fn order_type(&self) -> &str {
        fallback::resolve_str(&self.document, fallback::ORDER_TYPE).unwrap_or("market")
    }

    pub fn time_in_force(&self) -> &str {
        fallback::resolve_str(&self.document, fallback::TIME_IN_FORCE).unwrap_or("gtc")
    }

    pub fn price(&self) -> Option<Number> {
        fallback::resolve_number(&self.document, fallback::PRICE)
    }

    pub fn stop_amount(&self) -> Option<Number> {
        fallback::resolve_number(&self.document, fallback::STOP_AMOUNT)
    }

    pub fn trail_amount(&self) -> Option<Number> {
        fallback::resolve_number(&self.document, fallback::TRAIL_AMOUNT)
    }

    pub fn trigger_distance(&self) -> Option<Number> {
        fallback::resolve_number(&self.document, fallback::TRIGGER_DISTANCE)
    }

    pub fn sentiment(&self) -> Option<&Value> {
        self.document.get("sentiment")
    }

    pub fn order_strategy_type_id(&self) -> Option<&Value> {
        self.document.get("orderStrategyTypeId")
    }

    /// Pass-through document for exit routes, with a best-effort price
    /// backfill: the downstream copes better when a reference price is
    /// attached, but its absence is not an error.
    pub fn document_with_price(&self) -> Value {
        let mut document = self.document.clone();
        if document.get("price").is_none() {
            if let Some(price) = fallback::resolve_number(&document, fallback::EXIT_PRICE) {
                document["price"] = Value::Number(price);
            }
        }
        document
    }
}
