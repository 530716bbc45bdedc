//! Product lookups for stock views and the POS scanner.

use std::sync::Arc;

use crate::domain::entities::product::Product;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BatchRepository, ProductRepository};

pub const DEFAULT_AVAILABLE_LIMIT: i64 = 50;
pub const MAX_AVAILABLE_LIMIT: i64 = 500;

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    batches: Arc<dyn BatchRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, batches: Arc<dyn BatchRepository>) -> Self {
        Self { products, batches }
    }

    /// In-stock units, oldest first
    pub async fn available(&self, limit: Option<i64>) -> DomainResult<Vec<Product>> {
        let limit = limit
            .unwrap_or(DEFAULT_AVAILABLE_LIMIT)
            .clamp(1, MAX_AVAILABLE_LIMIT);
        self.products.list_available(limit).await
    }

    pub async fn by_batch(&self, batch_id: i64) -> DomainResult<Vec<Product>> {
        if self.batches.find_by_id(batch_id).await?.is_none() {
            return Err(DomainError::not_found("Batch"));
        }
        self.products.list_by_batch(batch_id).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product"))
    }

    /// Scanner lookup; the code is matched after trimming and upper-casing
    pub async fn by_imei(&self, imei: &str) -> DomainResult<Product> {
        let imei = imei.trim().to_ascii_uppercase();
        if imei.is_empty() {
            return Err(DomainError::validation("IMEI is required"));
        }
        self.products
            .find_by_imei(&imei)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product with IMEI {}", imei)))
    }
}
