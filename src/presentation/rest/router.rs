use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::application::RouteTable;
use crate::infrastructure::{BroadcastHub, HttpForwarder};

/// Application state shared across handlers - uses concrete infrastructure types
pub struct AppState {
    pub routes: RouteTable,
    pub forwarder: Arc<HttpForwarder>,
    pub hub: Arc<BroadcastHub>,
}

impl AppState {
    pub fn new(routes: RouteTable, forwarder: Arc<HttpForwarder>, hub: Arc<BroadcastHub>) -> Self {
        AppState {
            routes,
            forwarder,
            hub,
        }
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Diagnostics
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/ping", get(handlers::ping))
        // Webhook ingress
        .route("/pine-entry", post(handlers::webhook))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
