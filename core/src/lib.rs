//! # Warehouse Core
//!
//! Core business logic and domain layer for the warehouse backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Category, CategoryUpdate, Claims, ImportBatch, NewBatch, NewCategory, NewSale, NewSaleLine,
    Product, ProductStatus, SaleRecord, SalesInvoice, SalesInvoiceDetail, WarehouseUser,
    MAX_UNIT_AMOUNT,
};
pub use domain::value_objects::{
    BatchStatus, BatchSummary, DashboardOverview, InventoryTotals, LoginResult, RevenuePoint,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{
    BatchRepository, CategoryRepository, InMemoryStore, ProductRepository, SalesRepository,
};
pub use services::{
    AuthService, BatchService, BatchServiceConfig, CategoryService, CreateBatch, DashboardService,
    ProductService, SaleRequest, SalesService, SalesServiceConfig, TokenService,
    TokenServiceConfig,
};
