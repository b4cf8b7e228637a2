//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `NEUROLEARN` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use neurolearn::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod assessment;
mod auth;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use assessment::AssessmentConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; `validate()` enforces what must be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Inference gateway
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `NEUROLEARN__*` variables:
    ///
    /// - `NEUROLEARN__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEUROLEARN__AI__API_KEY=...` -> `ai.api_key = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEUROLEARN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let production = self.is_production();
        self.server.validate()?;
        self.database.validate(production)?;
        self.auth.validate(production)?;
        self.ai.validate()?;
        self.assessment.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
