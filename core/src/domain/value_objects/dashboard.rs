//! Dashboard report value objects.
//!
//! Stores return raw aggregates (`BatchStock`, `InventoryTotals`,
//! `SaleLedgerEntry`); the derived figures (margins, statuses, per-day
//! buckets) are computed here so every backend reports identically.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::sale::SalesInvoice;

/// Sell-through state of an import batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Nothing sold yet
    Active,
    /// Some units sold
    Partial,
    /// Every unit sold
    Completed,
}

impl BatchStatus {
    pub fn from_counts(sold: i64, total: i64) -> Self {
        if total > 0 && sold == total {
            BatchStatus::Completed
        } else if sold > 0 && sold < total {
            BatchStatus::Partial
        } else {
            BatchStatus::Active
        }
    }
}

/// Raw per-batch aggregate as read from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStock {
    pub batch_id: i64,
    pub batch_code: String,
    pub category_name: Option<String>,
    pub import_date: DateTime<Utc>,
    pub total_quantity: i64,
    pub sold_quantity: i64,
    pub total_import_value: i64,
    /// Revenue from the batch's sold units
    pub total_sales_value: i64,
    /// Import cost of the batch's sold units
    pub sold_cost: i64,
}

/// Per-batch line on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub batch_id: i64,
    pub batch_code: String,
    pub category_name: Option<String>,
    pub import_date: DateTime<Utc>,
    pub total_quantity: i64,
    pub sold_quantity: i64,
    pub remaining_quantity: i64,
    pub total_import_value: i64,
    pub total_sales_value: i64,
    pub total_profit: i64,
    /// Percent, two decimals
    pub profit_margin: f64,
    pub status: BatchStatus,
}

impl From<BatchStock> for BatchSummary {
    fn from(stock: BatchStock) -> Self {
        let total_profit = stock.total_sales_value - stock.sold_cost;
        Self {
            remaining_quantity: stock.total_quantity - stock.sold_quantity,
            profit_margin: profit_margin(total_profit, stock.total_sales_value),
            status: BatchStatus::from_counts(stock.sold_quantity, stock.total_quantity),
            total_profit,
            batch_id: stock.batch_id,
            batch_code: stock.batch_code,
            category_name: stock.category_name,
            import_date: stock.import_date,
            total_quantity: stock.total_quantity,
            sold_quantity: stock.sold_quantity,
            total_import_value: stock.total_import_value,
            total_sales_value: stock.total_sales_value,
        }
    }
}

/// `profit / sales * 100`, rounded to two decimals; 0 when nothing was sold
pub fn profit_margin(profit: i64, sales: i64) -> f64 {
    if sales == 0 {
        return 0.0;
    }
    let margin = profit as f64 / sales as f64 * 100.0;
    (margin * 100.0).round() / 100.0
}

/// One invoice's contribution to revenue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLedgerEntry {
    pub sold_at: DateTime<Utc>,
    pub amount: i64,
    pub cost: i64,
}

/// One business date on the revenue chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: i64,
    pub profit: i64,
    pub sales_count: i64,
}

impl RevenuePoint {
    pub fn empty(date: NaiveDate) -> Self {
        Self { date, revenue: 0, profit: 0, sales_count: 0 }
    }
}

/// Stock counts as read from storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTotals {
    pub total_categories: i64,
    pub total_batches: i64,
    pub total_products: i64,
    pub in_stock: i64,
    pub sold: i64,
    /// Import cost of every unit ever received
    pub total_import_value: i64,
    /// Import cost of units still in stock
    pub stock_value: i64,
}

/// All-time invoice aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesTotals {
    pub invoice_count: i64,
    pub revenue: i64,
    pub cost: i64,
}

/// Headline figures for the dashboard landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(flatten)]
    pub inventory: InventoryTotals,
    pub total_revenue: i64,
    pub total_profit: i64,
    pub total_invoices: i64,
    pub today: NaiveDate,
    pub today_revenue: i64,
    pub today_profit: i64,
    pub today_sales_count: i64,
    pub recent_sales: Vec<SalesInvoice>,
}
