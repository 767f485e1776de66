//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! layered sources: built-in defaults, `default.toml`, an environment
//! overlay, `FILO__*` environment variables and command-line overrides.

pub mod app;
pub mod database;
pub mod logging;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::registry::RegistryConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Values supplied on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Overrides `server.port`.
    pub port: Option<u16>,
    /// Overrides `logging.level`.
    pub log_level: Option<String>,
    /// Overrides `database.url`.
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from `{config_dir}/default.toml`, the
    /// `{config_dir}/{env}.toml` overlay and `FILO__` environment variables,
    /// then apply command-line overrides.
    pub fn load_with_overrides(
        config_dir: &str,
        env: &str,
        overrides: &ConfigOverrides,
    ) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{config_dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{config_dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FILO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("logging.level", overrides.log_level.clone())?
            .set_override_option("database.url", overrides.database_url.clone())?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.registry.default_list_limit == 0 {
            return Err(AppError::configuration(
                "registry.default_list_limit must be greater than zero",
            ));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "server.request_timeout_seconds must be greater than zero",
            ));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(AppError::configuration(format!(
                "logging.format must be \"json\" or \"pretty\", got \"{}\"",
                self.logging.format
            )));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::configuration(
                "database.min_connections exceeds database.max_connections",
            ));
        }
        Ok(())
    }
}
