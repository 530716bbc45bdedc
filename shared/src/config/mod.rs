//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and the warehouse user list
//! - `business` - business timezone used for calendar-date grouping
//! - `database` - database connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `storage` - storage backend selection
//!
//! [`AppConfig::load`] layers, in increasing priority: serde defaults,
//! `config/default.toml`, `config/{environment}.toml`, `WAREHOUSE__*`
//! environment variables, and finally the legacy flat variables
//! (`DATABASE_URL`, `JWT_SECRET`, `SERVER_HOST`, `SERVER_PORT`).

pub mod auth;
pub mod business;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, UserAccount};
pub use business::BusinessConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

/// Prefix for structured environment overrides, e.g. `WAREHOUSE__DATABASE__URL`
pub const ENV_PREFIX: &str = "WAREHOUSE";

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Storage backend selection
    pub storage: StorageConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Business rules configuration
    pub business: BusinessConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            business: BusinessConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.environment = environment;
        config.apply_legacy_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply the flat environment variables used by deployment scripts
    fn apply_legacy_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt.secret = secret;
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt.secret must not be empty".into()));
        }
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "auth.jwt.secret must be set in production".into(),
            ));
        }
        if self.auth.jwt.expiry_seconds <= 0 {
            return Err(ConfigError::Invalid("auth.jwt.expiry_seconds must be positive".into()));
        }
        self.business.tz().map_err(ConfigError::Invalid)?;
        if self.storage.backend == StorageBackend::Mysql && self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must be set for mysql storage".into()));
        }
        Ok(())
    }
}
