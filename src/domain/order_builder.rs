use thiserror::Error;

use super::order::{ExecutionOrder, StopLoss};
use super::signal::NormalizedSignal;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Missing quantity")]
    MissingQuantity,
    #[error("Missing price - required for non-market orders")]
    MissingPrice,
}

/// Derives a strict [`ExecutionOrder`] from a loosely-shaped signal.
///
/// This is schema reconciliation, not trading logic: the upstream
/// platform emits the same fields in several shapes and the builder
/// collapses them into the one shape the execution endpoint accepts.
pub struct OrderBuilder;

impl OrderBuilder {
    /// Pure and deterministic: the same signal always yields a
    /// structurally identical order.
    pub fn build(signal: &NormalizedSignal) -> Result<ExecutionOrder, BuildError> {
        let quantity = signal.quantity().ok_or(BuildError::MissingQuantity)?;
        let order_type = signal.order_type().to_string();

        let mut order = ExecutionOrder {
            strategy_id: signal.strategy_id().to_string(),
            action: signal.action(),
            sentiment: signal.sentiment().cloned(),
            ticker: signal.ticker().to_string(),
            order_strategy_type_id: signal.order_strategy_type_id().cloned(),
            quantity_type: "fixed_quantity",
            quantity,
            order_type,
            time_in_force: signal.time_in_force().to_string(),
            price: None,
            stop_loss: None,
            trailing_stop: None,
            trail_price_type: None,
            trail_amount: None,
            trigger_distance: None,
        };

        // Market orders carry no relative levels: without a reference
        // price the downstream cannot compute stop or trail distances.
        if order.is_market() {
            return Ok(order);
        }

        order.price = Some(signal.price().ok_or(BuildError::MissingPrice)?);

        // The trailing block is all-or-nothing. Missing any of the three
        // inputs degrades to a plain limit order; a partially populated
        // block would be rejected downstream.
        if let (Some(stop), Some(trail), Some(trigger)) = (
            signal.stop_amount(),
            signal.trail_amount(),
            signal.trigger_distance(),
        ) {
            order.stop_loss = Some(StopLoss::stop(stop));
            order.trailing_stop = Some(true);
            order.trail_price_type = Some("Absolute");
            order.trail_amount = Some(trail);
            order.trigger_distance = Some(trigger);
        }

        Ok(order)
    }
}
