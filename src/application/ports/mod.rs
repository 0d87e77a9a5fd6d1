mod forwarder;
mod signal_publisher;

pub use forwarder::{ForwardError, SignalForwarder};
pub use signal_publisher::SignalPublisher;
