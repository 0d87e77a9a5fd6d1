//! Signal Gateway
//!
//! A webhook relay that accepts trading-signal alerts from a charting
//! platform, normalizes them, and routes them to downstream
//! order-execution endpoints over HTTP, while mirroring every accepted
//! signal to live WebSocket subscribers.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Domain**: Signal normalization and the strict order shape
//!   (NormalizedSignal, ExecutionOrder, OrderBuilder, fallback tables)
//! - **Application**: The routing use case and port interfaces
//!   (RouteSignalUseCase, SignalForwarder, SignalPublisher)
//! - **Infrastructure**: Implementations of ports (HttpForwarder,
//!   BroadcastHub) plus payload parsing and configuration
//! - **Presentation**: REST webhook handlers and the WebSocket push channel
//!
//! # Example
//!
//! ```ignore
//! use signal_gateway::{Gateway, GatewayConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GatewayConfig::from_env();
//!     let gateway = Gateway::new(config);
//!     gateway.run().await.unwrap();
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types
pub use domain::{Action, BuildError, ExecutionOrder, NormalizedSignal, OrderBuilder, SignalError};

pub use application::{
    ForwardError, RouteError, RouteOutcome, RouteSignalUseCase, RouteTable, SignalForwarder,
    SignalPublisher,
};

pub use infrastructure::{
    parse_payload, BroadcastHub, ConfigError, GatewayConfig, HttpForwarder, ParseError,
};

pub use presentation::{create_router, ApiError, AppState, WsState};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The gateway server: configuration plus the shared infrastructure
/// handed to every request handler.
pub struct Gateway {
    pub config: GatewayConfig,
    pub forwarder: Arc<HttpForwarder>,
    pub hub: Arc<BroadcastHub>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Self {
        Gateway {
            config,
            forwarder: Arc::new(HttpForwarder::new()),
            hub: Arc::new(BroadcastHub::default()),
        }
    }

    /// Create the combined REST + WebSocket router.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState::new(
            self.config.routes.clone(),
            Arc::clone(&self.forwarder),
            Arc::clone(&self.hub),
        ));

        let ws_state = Arc::new(WsState {
            hub: Arc::clone(&self.hub),
        });

        create_router(state).route(
            "/ws",
            axum::routing::get({
                move |ws| presentation::ws_handler(ws, axum::extract::State(ws_state))
            }),
        )
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.bind_addr();
        let router = self.router();

        tracing::info!("Signal gateway listening on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
