pub mod broadcast_hub;
pub mod config;
pub mod http_forwarder;
pub mod parsers;

pub use broadcast_hub::BroadcastHub;
pub use config::{ConfigError, GatewayConfig, ServerConfig};
pub use http_forwarder::HttpForwarder;
pub use parsers::{parse_payload, ParseError};
