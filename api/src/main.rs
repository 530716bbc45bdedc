use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use wh_infra::Database;
use wh_shared::config::{AppConfig, StorageBackend};

use wh_api::{create_app, telemetry, AppState, Repositories};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    telemetry::init(&config.logging);

    info!(
        environment = %config.environment,
        storage = ?config.storage.backend,
        "Starting warehouse API server"
    );
    if config.auth.jwt.is_using_default_secret() {
        warn!("auth.jwt.secret is the built-in default; set JWT_SECRET outside development");
    }
    if config.auth.users.is_empty() {
        warn!("No users configured under auth.users; nobody can log in");
    }

    let database = match config.storage.backend {
        StorageBackend::Memory => None,
        StorageBackend::Mysql => {
            info!(url = %config.database.redacted_url(), "Using MySQL storage");
            let database = Database::new(config.database.clone());
            if config.storage.run_migrations {
                database.run_migrations().await.context("running migrations")?;
                info!("Migrations applied");
            }
            Some(database)
        }
    };
    let repositories = match &database {
        Some(database) => Repositories::mysql(database),
        None => Repositories::in_memory(),
    };

    let state = web::Data::new(AppState::new(&config, repositories, database.clone())?);
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(database) = database {
        database.close().await;
    }
    info!("Server stopped");
    Ok(())
}
