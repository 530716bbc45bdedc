//! Business services containing domain logic and use cases.

pub mod auth;
pub mod batch;
pub mod category;
pub mod dashboard;
pub mod numbering;
pub mod product;
pub mod sales;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use batch::{BatchService, BatchServiceConfig, CreateBatch};
pub use category::CategoryService;
pub use dashboard::DashboardService;
pub use product::ProductService;
pub use sales::{SaleRequest, SalesService, SalesServiceConfig};
pub use token::{TokenService, TokenServiceConfig};
