//! Application state and factory
//!
//! [`AppState`] holds one instance of every core service, built over a set
//! of [`Repositories`]; [`create_app`] wires the routes, middleware and
//! extractor error handlers around it. `main` and the integration tests
//! build the app the same way, differing only in the repositories.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use anyhow::Context;
use chrono_tz::Tz;
use tracing_actix_web::TracingLogger;
use wh_core::{
    AuthService, BatchRepository, BatchService, BatchServiceConfig, CategoryRepository,
    CategoryService, DashboardService, DomainError, InMemoryStore, ProductRepository,
    ProductService, SalesRepository, SalesService, SalesServiceConfig, TokenService,
    TokenServiceConfig,
};
use wh_infra::{
    Database, MySqlBatchRepository, MySqlCategoryRepository, MySqlProductRepository,
    MySqlSalesRepository,
};
use wh_shared::config::{AppConfig, StorageBackend};

use crate::handlers::ApiError;
use crate::middleware::{create_cors, JwtAuth};
use crate::routes;

/// The four stores the services run against
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub batches: Arc<dyn BatchRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub sales: Arc<dyn SalesRepository>,
}

impl Repositories {
    /// All four backed by one process-local store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            categories: store.clone(),
            batches: store.clone(),
            products: store.clone(),
            sales: store,
        }
    }

    pub fn mysql(database: &Database) -> Self {
        Self {
            categories: Arc::new(MySqlCategoryRepository::new(database.clone())),
            batches: Arc::new(MySqlBatchRepository::new(database.clone())),
            products: Arc::new(MySqlProductRepository::new(database.clone())),
            sales: Arc::new(MySqlSalesRepository::new(database.clone())),
        }
    }
}

/// Application state shared by every worker
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub auth: AuthService,
    pub categories: CategoryService,
    pub batches: BatchService,
    pub products: ProductService,
    pub sales: SalesService,
    pub dashboard: DashboardService,
    pub timezone: Tz,
    pub backend: StorageBackend,
    /// Present for the mysql backend; used by the health check
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        repositories: Repositories,
        database: Option<Database>,
    ) -> anyhow::Result<Self> {
        let timezone = config
            .business
            .tz()
            .map_err(anyhow::Error::msg)
            .context("business.timezone")?;

        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        let Repositories {
            categories,
            batches,
            products,
            sales,
        } = repositories;

        Ok(Self {
            auth: AuthService::new(&config.auth, tokens.clone()),
            tokens,
            categories: CategoryService::new(categories.clone()),
            batches: BatchService::new(
                batches.clone(),
                categories,
                BatchServiceConfig {
                    batch_prefix: config.business.batch_prefix.clone(),
                    timezone,
                },
            ),
            products: ProductService::new(products.clone(), batches.clone()),
            sales: SalesService::new(
                sales.clone(),
                SalesServiceConfig {
                    invoice_prefix: config.business.invoice_prefix.clone(),
                    timezone,
                },
            ),
            dashboard: DashboardService::new(products, batches, sales, timezone),
            timezone,
            backend: if database.is_some() {
                StorageBackend::Mysql
            } else {
                StorageBackend::Memory
            },
            database,
        })
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let auth = JwtAuth::new(state.tokens.clone());

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
        )
        .wrap(create_cors(&config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(routes::health::health))
        .service(web::scope("/api").configure(|cfg| routes::configure(cfg, auth)))
        .default_service(web::to(not_found))
}

async fn not_found() -> Result<actix_web::HttpResponse, ApiError> {
    Err(DomainError::not_found("Route").into())
}
