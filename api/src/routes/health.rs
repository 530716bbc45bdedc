use actix_web::web;
use chrono::{DateTime, Utc};
use serde::Serialize;
use wh_shared::config::StorageBackend;

use crate::app::AppState;
use crate::handlers::{ok, ApiResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub storage: StorageBackend,
    /// Absent for the in-memory backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_connected: Option<bool>,
}

/// Liveness; always 200, with the database flag reporting connectivity
pub async fn health(state: web::Data<AppState>) -> ApiResult {
    let database_connected = match &state.database {
        Some(database) => Some(match database.health_check().await {
            Ok(connected) => connected,
            Err(err) => {
                tracing::warn!(error = %err, "Database health check failed");
                false
            }
        }),
        None => None,
    };

    ok(HealthStatus {
        status: "healthy",
        service: "warehouse-api",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        storage: state.backend,
        database_connected,
    })
}
