//! MySQL pool construction.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, MySqlPool};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;
use wh_shared::config::DatabaseConfig;

use super::pool::PoolConnector;
use crate::InfrastructureError;

/// Builds MySQL pools from [`DatabaseConfig`]
pub struct MySqlConnector {
    config: DatabaseConfig,
}

impl MySqlConnector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn connect_options(&self) -> Result<MySqlConnectOptions, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&self.config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let statements = if self.config.enable_logging {
            LevelFilter::Debug
        } else {
            LevelFilter::Off
        };
        Ok(options.log_statements(statements).log_slow_statements(
            LevelFilter::Warn,
            Duration::from_millis(self.config.slow_query_threshold),
        ))
    }
}

#[async_trait]
impl PoolConnector for MySqlConnector {
    type Pool = MySqlPool;

    async fn connect(&self) -> Result<MySqlPool, InfrastructureError> {
        tracing::info!(
            url = %self.config.redacted_url(),
            max_connections = self.config.max_connections,
            "Creating database connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(self.config.connect_timeout))
            .idle_timeout(Duration::from_secs(self.config.idle_timeout))
            .max_lifetime(Duration::from_secs(self.config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(self.connect_options()?)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");
        Ok(pool)
    }

    fn is_open(&self, pool: &MySqlPool) -> bool {
        !pool.is_closed()
    }

    async fn close(&self, pool: MySqlPool) {
        pool.close().await;
    }
}
