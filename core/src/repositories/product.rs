//! Product repository trait.

use async_trait::async_trait;

use crate::domain::entities::product::Product;
use crate::domain::value_objects::dashboard::InventoryTotals;
use crate::errors::DomainError;

/// Read operations for product units
///
/// Products are written only as part of a batch import or a sale, so the
/// write paths live on [`BatchRepository`](super::BatchRepository) and
/// [`SalesRepository`](super::SalesRepository).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// IN_STOCK products, oldest first, at most `limit`
    async fn list_available(&self, limit: i64) -> Result<Vec<Product>, DomainError>;

    /// Every product of a batch, ordered by id
    async fn list_by_batch(&self, batch_id: i64) -> Result<Vec<Product>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;

    async fn find_by_imei(&self, imei: &str) -> Result<Option<Product>, DomainError>;

    /// Counts and values across categories, batches and products
    async fn inventory_totals(&self) -> Result<InventoryTotals, DomainError>;
}
