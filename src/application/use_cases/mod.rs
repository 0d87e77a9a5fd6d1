mod route_signal;

pub use route_signal::{RouteError, RouteOutcome, RouteSignalUseCase, RouteTable};
