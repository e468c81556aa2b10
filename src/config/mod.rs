//! Application configuration, loaded from environment variables.
//!
//! Variables use the `MENULINK` prefix with `__` as the section separator,
//! e.g. `MENULINK__SERVER__PORT=8080` or `MENULINK__GATEWAY__KEY_ID=...`.

mod error;
mod gateway;
mod server;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Loads configuration from a `.env` file (if present) and the process
    /// environment, then validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, values fail
    /// to deserialize, or validation rejects them.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MENULINK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}
