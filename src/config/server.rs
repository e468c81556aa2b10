//! HTTP server configuration.

use std::net::SocketAddr;

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the HTTP listener.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment name, e.g. `development` or `production`.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-request timeout applied by the HTTP layer.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if host and port do not form a valid
    /// socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ValidationError::new("server.host", format!("invalid address: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::new(
                "server.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
