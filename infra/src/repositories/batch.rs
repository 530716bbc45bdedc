//! MySQL implementation of the BatchRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;

use wh_core::domain::entities::batch::{ImportBatch, NewBatch};
use wh_core::domain::value_objects::dashboard::BatchStock;
use wh_core::errors::DomainError;
use wh_core::repositories::BatchRepository;

use super::row::{get, is_duplicate, tx_execute, tx_fetch_optional};
use crate::database::{Database, Params, SqlValue};
use crate::InfrastructureError;

const SELECT_BATCH: &str = "SELECT b.id, b.batch_code, b.category_id, c.name AS category_name, \
     b.quantity, b.import_price, b.selling_price, b.total_value, b.import_date, b.supplier, \
     b.notes, b.created_at \
     FROM crm_import_batches b LEFT JOIN crm_categories c ON c.id = b.category_id";

/// Rows per multi-row product INSERT
const PRODUCT_CHUNK: usize = 500;

pub struct MySqlBatchRepository {
    db: Database,
}

impl MySqlBatchRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn from_row(row: &MySqlRow) -> Result<ImportBatch, DomainError> {
        Ok(ImportBatch {
            id: get(row, "id")?,
            batch_code: get(row, "batch_code")?,
            category_id: get(row, "category_id")?,
            category_name: get(row, "category_name")?,
            quantity: get(row, "quantity")?,
            import_price: get(row, "import_price")?,
            selling_price: get(row, "selling_price")?,
            total_value: get(row, "total_value")?,
            import_date: get(row, "import_date")?,
            supplier: get(row, "supplier")?,
            notes: get(row, "notes")?,
            created_at: get(row, "created_at")?,
        })
    }

    fn map_write_error(err: InfrastructureError) -> DomainError {
        if is_duplicate(&err, "uq_crm_products_imei") {
            DomainError::business_rule("Product identifier already exists")
        } else if is_duplicate(&err, "uq_crm_import_batches_code") {
            DomainError::business_rule("Batch code already exists")
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl BatchRepository for MySqlBatchRepository {
    async fn list(&self) -> Result<Vec<ImportBatch>, DomainError> {
        let sql = format!("{} ORDER BY b.import_date DESC, b.id DESC", SELECT_BATCH);
        let rows = self.db.execute_query(&sql, &Params::new()).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ImportBatch>, DomainError> {
        let sql = format!("{} WHERE b.id = @id", SELECT_BATCH);
        let rows = self.db.execute_query(&sql, &Params::new().with("id", id)).await?;
        rows.first().map(Self::from_row).transpose()
    }

    async fn create(&self, batch: NewBatch) -> Result<ImportBatch, DomainError> {
        let total_value = batch.total_value()?;
        // Dropping the transaction on an error path rolls it back.
        let mut tx = self.db.begin().await?;

        let category = tx_fetch_optional(
            &mut tx,
            "SELECT name FROM crm_categories WHERE id = @id",
            &Params::new().with("id", batch.category_id),
        )
        .await?
        .ok_or_else(|| DomainError::not_found("Category"))?;
        let category_name: String = get(&category, "name")?;

        let now = Utc::now();
        let params = Params::new()
            .with("batchCode", batch.batch_code.as_str())
            .with("categoryId", batch.category_id)
            .with("quantity", batch.quantity())
            .with("importPrice", batch.import_price)
            .with("sellingPrice", batch.selling_price)
            .with("totalValue", total_value)
            .with("importDate", batch.import_date)
            .with("supplier", batch.supplier.clone())
            .with("notes", batch.notes.clone())
            .with("now", now);
        let inserted = tx_execute(
            &mut tx,
            "INSERT INTO crm_import_batches (batch_code, category_id, quantity, import_price, \
             selling_price, total_value, import_date, supplier, notes, created_at) \
             VALUES (@batchCode, @categoryId, @quantity, @importPrice, @sellingPrice, \
             @totalValue, @importDate, @supplier, @notes, @now)",
            &params,
        )
        .await
        .map_err(Self::map_write_error)?;
        let batch_id = inserted.last_insert_id() as i64;

        let shared = Params::new()
            .with("name", batch.product_name.as_str())
            .with("batchId", batch_id)
            .with("categoryId", batch.category_id)
            .with("importPrice", batch.import_price)
            .with("sellingPrice", batch.selling_price)
            .with("now", now);
        for chunk in batch.identifiers.chunks(PRODUCT_CHUNK) {
            let mut params = shared.clone();
            let mut rows = Vec::with_capacity(chunk.len());
            for (i, imei) in chunk.iter().enumerate() {
                let name = format!("imei{}", i);
                rows.push(format!(
                    "(@{}, @name, @batchId, @categoryId, @importPrice, @sellingPrice, 'IN_STOCK', @now)",
                    name
                ));
                params = params.with(&name, SqlValue::Text(imei.clone()));
            }
            let sql = format!(
                "INSERT INTO crm_products (imei, name, batch_id, category_id, import_price, \
                 selling_price, status, created_at) VALUES {}",
                rows.join(", ")
            );
            tx_execute(&mut tx, &sql, &params)
                .await
                .map_err(Self::map_write_error)?;
        }

        tx.commit().await.map_err(InfrastructureError::from)?;

        Ok(ImportBatch {
            id: batch_id,
            quantity: batch.quantity(),
            total_value,
            batch_code: batch.batch_code,
            category_id: batch.category_id,
            category_name: Some(category_name),
            import_price: batch.import_price,
            selling_price: batch.selling_price,
            import_date: batch.import_date,
            supplier: batch.supplier,
            notes: batch.notes,
            created_at: now,
        })
    }

    async fn stock_summary(&self) -> Result<Vec<BatchStock>, DomainError> {
        let rows = self
            .db
            .execute_query(
                "SELECT b.id AS batch_id, b.batch_code, c.name AS category_name, b.import_date, \
                 COUNT(p.id) AS total_quantity, \
                 CAST(COALESCE(SUM(p.status = 'SOLD'), 0) AS SIGNED) AS sold_quantity, \
                 CAST(COALESCE(SUM(p.import_price), 0) AS SIGNED) AS total_import_value, \
                 CAST(COALESCE(SUM(CASE WHEN p.status = 'SOLD' THEN p.import_price ELSE 0 END), 0) \
                   AS SIGNED) AS sold_cost, \
                 CAST(COALESCE((SELECT SUM(d.line_total) FROM crm_sales_invoice_details d \
                   JOIN crm_products sp ON sp.id = d.product_id WHERE sp.batch_id = b.id), 0) \
                   AS SIGNED) AS total_sales_value \
                 FROM crm_import_batches b \
                 LEFT JOIN crm_categories c ON c.id = b.category_id \
                 LEFT JOIN crm_products p ON p.batch_id = b.id \
                 GROUP BY b.id, b.batch_code, c.name, b.import_date \
                 ORDER BY b.import_date DESC, b.id DESC",
                &Params::new(),
            )
            .await?;

        rows.iter()
            .map(|row| -> Result<BatchStock, DomainError> {
                Ok(BatchStock {
                    batch_id: get(row, "batch_id")?,
                    batch_code: get(row, "batch_code")?,
                    category_name: get(row, "category_name")?,
                    import_date: get(row, "import_date")?,
                    total_quantity: get(row, "total_quantity")?,
                    sold_quantity: get(row, "sold_quantity")?,
                    total_import_value: get(row, "total_import_value")?,
                    total_sales_value: get(row, "total_sales_value")?,
                    sold_cost: get(row, "sold_cost")?,
                })
            })
            .collect()
    }
}
