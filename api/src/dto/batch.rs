use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use validator::Validate;
use wh_core::CreateBatch;
use wh_shared::timezone::business_day_bounds;

/// Import date as sent by the dashboard: a full timestamp, or a bare date
/// meaning the start of that business day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImportDate {
    Instant(DateTime<Utc>),
    Date(NaiveDate),
}

impl ImportDate {
    pub fn resolve(self, tz: Tz) -> DateTime<Utc> {
        match self {
            ImportDate::Instant(instant) => instant,
            ImportDate::Date(date) => business_day_bounds(date, tz).0,
        }
    }
}

/// Body of `POST /api/cable-batches`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    pub category_id: i64,
    #[validate(range(min = 1, max = 10000, message = "Quantity must be between 1 and 10000"))]
    pub quantity: i64,
    #[validate(range(
        min = 0i64,
        max = 1000000000000i64,
        message = "Import price must be between 0 and 1000000000000"
    ))]
    pub import_price: i64,
    #[validate(range(
        min = 0i64,
        max = 1000000000000i64,
        message = "Selling price must be between 0 and 1000000000000"
    ))]
    pub selling_price: Option<i64>,
    pub import_date: Option<ImportDate>,
    #[validate(length(max = 255, message = "Supplier must be at most 255 characters"))]
    pub supplier: Option<String>,
    pub notes: Option<String>,
    #[validate(length(max = 255, message = "Product name must be at most 255 characters"))]
    pub product_name: Option<String>,
    #[validate(length(max = 64, message = "Batch code must be at most 64 characters"))]
    pub batch_code: Option<String>,
    #[serde(default, alias = "imeiList")]
    pub imeis: Option<Vec<String>>,
}

impl CreateBatchRequest {
    pub fn into_command(self, tz: Tz) -> CreateBatch {
        CreateBatch {
            category_id: self.category_id,
            quantity: self.quantity,
            import_price: self.import_price,
            selling_price: self.selling_price,
            import_date: self.import_date.map(|d| d.resolve(tz)),
            supplier: self.supplier,
            notes: self.notes,
            product_name: self.product_name,
            batch_code: self.batch_code,
            identifiers: self.imeis,
        }
    }
}
