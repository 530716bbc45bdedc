//! Sales invoice entities and the pricing rules shared by every store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::money::checked_sum;
use crate::domain::entities::product::Product;
use crate::errors::{DomainError, DomainResult};

/// A sales transaction header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoice {
    pub id: i64,
    pub invoice_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: String,
    /// Sum of line totals
    pub total_amount: i64,
    /// Sum of line cost prices
    pub total_cost: i64,
    pub notes: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SalesInvoice {
    pub fn profit(&self) -> i64 {
        self.total_amount - self.total_cost
    }
}

/// One sold unit on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoiceDetail {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: i64,
    pub imei: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub cost_price: i64,
    pub line_total: i64,
}

/// Invoice together with its line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(flatten)]
    pub invoice: SalesInvoice,
    pub details: Vec<SalesInvoiceDetail>,
}

/// A line requested by the cashier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSaleLine {
    pub product_id: i64,
    /// Overrides the product's selling price when present
    pub unit_price: Option<i64>,
}

/// A line after the product has been loaded and checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub imei: String,
    pub unit_price: i64,
    pub cost_price: i64,
}

impl NewSaleLine {
    /// Check the product can be sold and fix the line price
    pub fn price_against(&self, product: &Product) -> DomainResult<PricedLine> {
        if !product.is_in_stock() {
            return Err(DomainError::business_rule(format!(
                "Product {} is already sold",
                product.imei
            )));
        }
        let unit_price = self
            .unit_price
            .or(product.selling_price)
            .ok_or_else(|| {
                DomainError::validation(format!("Sale price is required for product {}", product.imei))
            })?;
        Ok(PricedLine {
            product_id: product.id,
            imei: product.imei.clone(),
            unit_price,
            cost_price: product.import_price,
        })
    }
}

/// A validated sale ready to be written atomically
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub invoice_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: String,
    pub notes: Option<String>,
    pub sold_at: DateTime<Utc>,
    pub lines: Vec<NewSaleLine>,
}

/// `(total_amount, total_cost)` of priced lines
pub fn invoice_totals(lines: &[PricedLine]) -> DomainResult<(i64, i64)> {
    let amount = checked_sum(lines.iter().map(|line| line.unit_price))?;
    let cost = checked_sum(lines.iter().map(|line| line.cost_price))?;
    Ok((amount, cost))
}
