pub mod ports;
pub mod use_cases;

pub use ports::{ForwardError, SignalForwarder, SignalPublisher};
pub use use_cases::{RouteError, RouteOutcome, RouteSignalUseCase, RouteTable};
