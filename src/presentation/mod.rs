pub mod rest;
pub mod websocket;

pub use rest::{create_router, ApiError, AppState};
pub use websocket::{ws_handler, WsState};
