//! Point-of-sale: turning in-stock units into invoices.

use chrono::Utc;
use chrono_tz::Tz;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use wh_shared::utils::validation::{is_valid_phone, normalize_phone};

use crate::domain::entities::money::MAX_UNIT_AMOUNT;
use crate::domain::entities::sale::{NewSale, NewSaleLine, SaleRecord, SalesInvoice};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SalesRepository;
use crate::services::numbering;

pub const DEFAULT_INVOICE_LIMIT: i64 = 50;
pub const MAX_INVOICE_LIMIT: i64 = 500;
pub const DEFAULT_PAYMENT_METHOD: &str = "CASH";
/// Width of the stored payment method column
pub const MAX_PAYMENT_METHOD_LEN: usize = 32;

/// Configuration for the sales service
#[derive(Debug, Clone)]
pub struct SalesServiceConfig {
    pub invoice_prefix: String,
    pub timezone: Tz,
}

impl Default for SalesServiceConfig {
    fn default() -> Self {
        Self {
            invoice_prefix: "HD".to_string(),
            timezone: chrono_tz::Asia::Ho_Chi_Minh,
        }
    }
}

/// A sale as submitted by the POS screen
#[derive(Debug, Clone, Default)]
pub struct SaleRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewSaleLine>,
}

pub struct SalesService {
    repository: Arc<dyn SalesRepository>,
    config: SalesServiceConfig,
}

impl SalesService {
    pub fn new(repository: Arc<dyn SalesRepository>, config: SalesServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Record a sale atomically
    ///
    /// # Returns
    ///
    /// * `Ok(SaleRecord)` - The stored invoice with its line items
    /// * `Err(DomainError::Validation)` - Empty cart, repeated product, bad price or phone
    /// * `Err(DomainError::NotFound)` - A product id does not exist
    /// * `Err(DomainError::BusinessRule)` - A product is already sold; nothing was written
    pub async fn record_sale(&self, request: SaleRequest) -> DomainResult<SaleRecord> {
        if request.items.is_empty() {
            return Err(DomainError::validation("At least one item is required"));
        }
        let mut seen = HashSet::with_capacity(request.items.len());
        for item in &request.items {
            if !seen.insert(item.product_id) {
                return Err(DomainError::validation(format!(
                    "Product {} appears more than once",
                    item.product_id
                )));
            }
            if item.unit_price.map_or(false, |p| p < 0) {
                return Err(DomainError::validation("Unit price must not be negative"));
            }
            if item.unit_price.map_or(false, |p| p > MAX_UNIT_AMOUNT) {
                return Err(DomainError::validation(format!(
                    "Unit price must be at most {}",
                    MAX_UNIT_AMOUNT
                )));
            }
        }

        let customer_phone = match trimmed(request.customer_phone) {
            Some(phone) if !is_valid_phone(&phone) => {
                return Err(DomainError::validation(format!("Invalid phone number: {}", phone)));
            }
            phone => phone.map(|p| normalize_phone(&p)),
        };
        let payment_method = trimmed(request.payment_method)
            .map(|m| m.to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());
        if payment_method.chars().count() > MAX_PAYMENT_METHOD_LEN {
            return Err(DomainError::validation(format!(
                "Payment method must be at most {} characters",
                MAX_PAYMENT_METHOD_LEN
            )));
        }

        let now = Utc::now();
        let sale = NewSale {
            invoice_number: numbering::invoice_number(
                &self.config.invoice_prefix,
                now,
                self.config.timezone,
            ),
            customer_name: trimmed(request.customer_name),
            customer_phone,
            payment_method,
            notes: trimmed(request.notes),
            sold_at: now,
            lines: request.items,
        };

        let record = self.repository.record_sale(sale).await?;
        info!(
            invoice_id = record.invoice.id,
            invoice_number = %record.invoice.invoice_number,
            items = record.details.len(),
            total_amount = record.invoice.total_amount,
            "Sale recorded"
        );
        Ok(record)
    }

    pub async fn get_invoice(&self, id: i64) -> DomainResult<SaleRecord> {
        self.repository
            .find_invoice(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invoice"))
    }

    /// Most recent invoices first
    pub async fn list_invoices(&self, limit: Option<i64>) -> DomainResult<Vec<SalesInvoice>> {
        let limit = limit.unwrap_or(DEFAULT_INVOICE_LIMIT).clamp(1, MAX_INVOICE_LIMIT);
        self.repository.list_invoices(limit).await
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
