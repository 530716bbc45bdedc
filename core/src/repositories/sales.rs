//! Sales repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::sale::{NewSale, SaleRecord, SalesInvoice};
use crate::domain::value_objects::dashboard::{SaleLedgerEntry, SalesTotals};
use crate::errors::DomainError;

/// Persistence operations for sales invoices
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Write invoice, details and product status changes in one transaction
    ///
    /// Every referenced product must exist and be IN_STOCK at commit time;
    /// otherwise nothing is written.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - a product id does not exist
    /// * `Err(DomainError::BusinessRule)` - a product is already SOLD
    async fn record_sale(&self, sale: NewSale) -> Result<SaleRecord, DomainError>;

    async fn find_invoice(&self, id: i64) -> Result<Option<SaleRecord>, DomainError>;

    /// Most recent invoices first
    async fn list_invoices(&self, limit: i64) -> Result<Vec<SalesInvoice>, DomainError>;

    /// One entry per invoice with `from <= sale_date < to`
    async fn ledger_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SaleLedgerEntry>, DomainError>;

    async fn totals(&self) -> Result<SalesTotals, DomainError>;
}
