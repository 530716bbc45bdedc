//! Shared utilities and common types for the warehouse server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered configuration loader
//! - The uniform API response envelope
//! - Business-timezone calendar arithmetic
//! - Small validation helpers (IMEI / serial format)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, BusinessConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, ServerConfig, StorageBackend, StorageConfig, UserAccount,
};
pub use types::ApiResponse;
pub use utils::{timezone, validation};
