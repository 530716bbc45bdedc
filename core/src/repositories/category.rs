//! Category repository trait.

use async_trait::async_trait;

use crate::domain::entities::category::{Category, CategoryUpdate, NewCategory};
use crate::errors::DomainError;

/// Persistence operations for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name, optionally filtered by `is_active`
    async fn list(&self, is_active: Option<bool>) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError>;

    /// Case-insensitive lookup by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;

    /// Insert a category
    ///
    /// # Returns
    /// * `Err(DomainError::BusinessRule)` - the name is already taken
    async fn create(&self, category: NewCategory) -> Result<Category, DomainError>;

    /// Apply a partial update, returning `None` when the id does not exist
    async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>, DomainError>;

    /// Delete by id, returning whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Number of import batches referencing the category
    async fn count_batches(&self, id: i64) -> Result<i64, DomainError>;
}
