//! Server configuration module.
//!
//! Settings for the HTTP façade: where it listens and how many runtime
//! workers serve requests.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port the autocomplete service listens on by default.
pub const DEFAULT_PORT: u16 = 13000;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Name of the server (used in logs)
    pub name: String,

    /// Address to bind the HTTP listener to
    pub address: SocketAddr,

    /// Number of tokio worker threads
    pub worker_threads: usize,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "mpc-autocomplete".to_string(),
            address: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            worker_threads: num_cpus::get(),
            request_timeout_ms: 5000,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Server name cannot be empty".to_string(),
            ));
        }

        if self.worker_threads == 0 {
            return Err(ConfigError::ValidationError(
                "worker_threads must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
