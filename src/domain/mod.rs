pub mod action;
pub mod fallback;
pub mod order;
pub mod order_builder;
pub mod signal;

pub use action::Action;
pub use order::{ExecutionOrder, StopLoss};
pub use order_builder::{BuildError, OrderBuilder};
pub use signal::{NormalizedSignal, SignalError};
