//! Import batch entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::money::checked_total;
use crate::errors::DomainResult;

/// A recorded import event covering `quantity` units of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    pub id: i64,
    pub batch_code: String,
    pub category_id: i64,
    pub category_name: Option<String>,
    /// Units imported
    pub quantity: i64,
    /// Cost per unit, in đồng
    pub import_price: i64,
    /// Suggested selling price per unit
    pub selling_price: Option<i64>,
    /// `quantity * import_price`
    pub total_value: i64,
    pub import_date: DateTime<Utc>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A batch ready to persist together with one product per identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBatch {
    pub batch_code: String,
    pub category_id: i64,
    pub import_price: i64,
    pub selling_price: Option<i64>,
    pub import_date: DateTime<Utc>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    /// Name given to every product unit in the batch
    pub product_name: String,
    /// One entry per unit; its length is the batch quantity
    pub identifiers: Vec<String>,
}

impl NewBatch {
    pub fn quantity(&self) -> i64 {
        self.identifiers.len() as i64
    }

    pub fn total_value(&self) -> DomainResult<i64> {
        checked_total(self.quantity(), self.import_price)
    }
}
