//! Configuration loading for the signal gateway.
//!
//! Supports a JSON configuration file plus environment overrides for
//! the listener address and the three downstream endpoint URLs. A
//! missing endpoint URL is deliberately not a startup failure: it
//! surfaces as `EndpointUnconfigured` only when that route is hit.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::application::RouteTable;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Root configuration for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub routes: RouteTable,
}

impl GatewayConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = GatewayConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Override listener address and endpoint URLs from the
    /// environment. Unset variables leave the current values alone.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        for (var, slot) in [
            ("TP_CORE_URL", &mut self.routes.core_url),
            ("TP_RUNNER_URL", &mut self.routes.runner_url),
            ("TP_ALT_URL", &mut self.routes.alt_url),
        ] {
            if let Ok(url) = std::env::var(var) {
                if !url.is_empty() {
                    *slot = Some(url);
                }
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
