//! Request and response bodies.

pub mod auth;
pub mod batch;
pub mod category;
pub mod query;
pub mod sales;

pub use auth::{CurrentUserResponse, LoginRequest};
pub use batch::{CreateBatchRequest, ImportDate};
pub use category::{CreateCategoryRequest, UpdateCategoryRequest};
pub use query::{CategoryListQuery, ChartQuery, LimitQuery};
pub use sales::{CreateSaleRequest, SaleItemRequest};
