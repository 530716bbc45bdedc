//! MySQL implementation of the ProductRepository trait.

use async_trait::async_trait;

use wh_core::domain::entities::product::Product;
use wh_core::domain::value_objects::dashboard::InventoryTotals;
use wh_core::errors::DomainError;
use wh_core::repositories::ProductRepository;

use super::row::{get, product_from_row, PRODUCT_COLUMNS};
use crate::database::{Database, Params};

pub struct MySqlProductRepository {
    db: Database,
}

impl MySqlProductRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn select(&self, tail: &str, params: Params) -> Result<Vec<Product>, DomainError> {
        let sql = format!("SELECT {} FROM crm_products {}", PRODUCT_COLUMNS, tail);
        let rows = self.db.execute_query(&sql, &params).await?;
        rows.iter().map(product_from_row).collect()
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn list_available(&self, limit: i64) -> Result<Vec<Product>, DomainError> {
        self.select(
            "WHERE status = 'IN_STOCK' ORDER BY created_at ASC, id ASC LIMIT @limit",
            Params::new().with("limit", limit),
        )
        .await
    }

    async fn list_by_batch(&self, batch_id: i64) -> Result<Vec<Product>, DomainError> {
        self.select(
            "WHERE batch_id = @batchId ORDER BY id ASC",
            Params::new().with("batchId", batch_id),
        )
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let mut products = self.select("WHERE id = @id", Params::new().with("id", id)).await?;
        Ok(products.pop())
    }

    async fn find_by_imei(&self, imei: &str) -> Result<Option<Product>, DomainError> {
        let mut products = self
            .select("WHERE imei = @imei LIMIT 1", Params::new().with("imei", imei))
            .await?;
        Ok(products.pop())
    }

    async fn inventory_totals(&self) -> Result<InventoryTotals, DomainError> {
        let rows = self
            .db
            .execute_query(
                "SELECT \
                 (SELECT COUNT(*) FROM crm_categories) AS total_categories, \
                 (SELECT COUNT(*) FROM crm_import_batches) AS total_batches, \
                 COUNT(*) AS total_products, \
                 CAST(COALESCE(SUM(status = 'IN_STOCK'), 0) AS SIGNED) AS in_stock, \
                 CAST(COALESCE(SUM(status = 'SOLD'), 0) AS SIGNED) AS sold, \
                 CAST(COALESCE(SUM(import_price), 0) AS SIGNED) AS total_import_value, \
                 CAST(COALESCE(SUM(CASE WHEN status = 'IN_STOCK' THEN import_price ELSE 0 END), 0) \
                   AS SIGNED) AS stock_value \
                 FROM crm_products",
                &Params::new(),
            )
            .await?;

        let row = match rows.first() {
            Some(row) => row,
            None => return Ok(InventoryTotals::default()),
        };
        Ok(InventoryTotals {
            total_categories: get(row, "total_categories")?,
            total_batches: get(row, "total_batches")?,
            total_products: get(row, "total_products")?,
            in_stock: get(row, "in_stock")?,
            sold: get(row, "sold")?,
            total_import_value: get(row, "total_import_value")?,
            stock_value: get(row, "stock_value")?,
        })
    }
}
