//! Import batch repository trait.

use async_trait::async_trait;

use crate::domain::entities::batch::{ImportBatch, NewBatch};
use crate::domain::value_objects::dashboard::BatchStock;
use crate::errors::DomainError;

/// Persistence operations for import batches
#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// All batches, newest import first
    async fn list(&self) -> Result<Vec<ImportBatch>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ImportBatch>, DomainError>;

    /// Insert the batch and one IN_STOCK product per identifier, atomically
    ///
    /// # Returns
    /// * `Err(DomainError::BusinessRule)` - an identifier is already in use
    async fn create(&self, batch: NewBatch) -> Result<ImportBatch, DomainError>;

    /// Per-batch stock and sales aggregates, newest import first
    async fn stock_summary(&self) -> Result<Vec<BatchStock>, DomainError>;
}
