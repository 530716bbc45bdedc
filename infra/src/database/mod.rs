//! Database module - pool lifecycle and query execution using SQLx
//!
//! [`Database`] is the entry point the repositories use: it acquires the
//! shared pool through the single-flight [`ConnectionManager`] and runs
//! named-parameter statements, stored procedures and transactions on it.

pub mod connection;
pub mod pool;
pub mod query;

use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::{MySql, MySqlPool, Transaction};
use std::sync::Arc;
use wh_shared::config::DatabaseConfig;

use crate::InfrastructureError;

pub use connection::MySqlConnector;
pub use pool::{ConnectionManager, PoolConnector};
pub use query::{NamedQuery, Params, SqlValue};

/// Shared handle to the MySQL database
#[derive(Clone)]
pub struct Database {
    manager: Arc<ConnectionManager<MySqlConnector>>,
}

impl Database {
    /// Creates the handle; no connection is made until first use
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            manager: Arc::new(ConnectionManager::new(MySqlConnector::new(config))),
        }
    }

    /// The shared pool, connecting on first use
    pub async fn pool(&self) -> Result<MySqlPool, InfrastructureError> {
        self.manager.get_connection().await
    }

    /// Runs a row-returning statement written with `@name` parameters
    pub async fn execute_query(
        &self,
        text: &str,
        params: &Params,
    ) -> Result<Vec<MySqlRow>, InfrastructureError> {
        let query = NamedQuery::new(text, params)?;
        let pool = self.pool().await?;
        Ok(query.query().fetch_all(&pool).await?)
    }

    /// Calls a stored procedure, binding `params` in order, and returns its first result set
    pub async fn execute_procedure(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<Vec<MySqlRow>, InfrastructureError> {
        let query = NamedQuery::procedure(name, params)?;
        let pool = self.pool().await?;
        Ok(query.query().fetch_all(&pool).await?)
    }

    /// Runs a statement that returns no rows
    pub async fn execute_statement(
        &self,
        text: &str,
        params: &Params,
    ) -> Result<MySqlQueryResult, InfrastructureError> {
        let query = NamedQuery::new(text, params)?;
        let pool = self.pool().await?;
        Ok(query.query().execute(&pool).await?)
    }

    pub async fn begin(&self) -> Result<Transaction<'static, MySql>, InfrastructureError> {
        Ok(self.pool().await?.begin().await?)
    }

    /// `SELECT 1` round trip
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let rows = self.execute_query("SELECT 1", &Params::new()).await?;
        Ok(rows.len() == 1)
    }

    /// Applies the bundled `crm_*` schema migrations
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Running database migrations");
        let pool = self.pool().await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.manager.is_connected()
    }

    /// Closes the pool; the next call reconnects
    pub async fn close(&self) {
        self.manager.close().await;
    }
}
