//! # Infrastructure Layer
//!
//! Concrete persistence for the warehouse backend:
//!
//! - **Pool guard**: a lazily created, single-flight MySQL connection pool
//! - **Query execution**: named `@param` statements and stored procedure calls
//! - **Repositories**: MySQL implementations of the core repository traits
//! - **Migrations**: the bundled `crm_*` schema

use std::sync::Arc;

use wh_core::errors::DomainError;

/// Database module - pool lifecycle and query execution using SQLx
pub mod database;

/// MySQL repository implementations
pub mod repositories;

pub use database::{
    ConnectionManager, Database, MySqlConnector, NamedQuery, Params, PoolConnector, SqlValue,
};
pub use repositories::{
    MySqlBatchRepository, MySqlCategoryRepository, MySqlProductRepository, MySqlSalesRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A pool connection attempt failed; every caller that waited on the
    /// attempt shares the same error
    #[error("Connection failed: {0}")]
    Connection(Arc<InfrastructureError>),

    /// A named parameter used in the SQL text was not supplied
    #[error("Missing query parameter: @{0}")]
    MissingParameter(String),

    /// Malformed statement or procedure name
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
