//! Product (single stock unit) entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a unit: it enters stock when its batch is imported and
/// leaves it exactly once, when sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    InStock,
    Sold,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::InStock => "IN_STOCK",
            ProductStatus::Sold => "SOLD",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_STOCK" => Ok(ProductStatus::InStock),
            "SOLD" => Ok(ProductStatus::Sold),
            other => Err(format!("Unknown product status: {}", other)),
        }
    }
}

/// A single trackable unit, identified by IMEI or a generated serial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub imei: String,
    pub name: String,
    pub batch_id: i64,
    pub category_id: i64,
    pub import_price: i64,
    pub selling_price: Option<i64>,
    pub status: ProductStatus,
    pub sold_date: Option<DateTime<Utc>>,
    pub invoice_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.status == ProductStatus::InStock
    }

    /// Transition IN_STOCK -> SOLD
    pub fn mark_sold(&mut self, invoice_number: &str, sold_at: DateTime<Utc>) {
        self.status = ProductStatus::Sold;
        self.sold_date = Some(sold_at);
        self.invoice_number = Some(invoice_number.to_string());
    }
}
