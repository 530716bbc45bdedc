//! Import batches: receiving stock into the warehouse.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};
use wh_shared::utils::validation::{imei_checksum_ok, is_valid_identifier, normalize_identifier};

use crate::domain::entities::batch::{ImportBatch, NewBatch};
use crate::domain::entities::money::MAX_UNIT_AMOUNT;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BatchRepository, CategoryRepository};
use crate::services::numbering;

/// Upper bound on units received in one batch
pub const MAX_BATCH_QUANTITY: i64 = 10_000;

/// Configuration for the batch service
#[derive(Debug, Clone)]
pub struct BatchServiceConfig {
    /// Prefix for generated batch codes
    pub batch_prefix: String,
    /// Business timezone used in generated codes
    pub timezone: Tz,
}

impl Default for BatchServiceConfig {
    fn default() -> Self {
        Self {
            batch_prefix: "LO".to_string(),
            timezone: chrono_tz::Asia::Ho_Chi_Minh,
        }
    }
}

/// Request to receive a batch of units
#[derive(Debug, Clone, Default)]
pub struct CreateBatch {
    pub category_id: i64,
    pub quantity: i64,
    pub import_price: i64,
    pub selling_price: Option<i64>,
    /// Defaults to now
    pub import_date: Option<DateTime<Utc>>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    /// Defaults to the category name
    pub product_name: Option<String>,
    /// Generated when absent
    pub batch_code: Option<String>,
    /// One IMEI per unit; serials are generated when absent or empty
    pub identifiers: Option<Vec<String>>,
}

pub struct BatchService {
    batches: Arc<dyn BatchRepository>,
    categories: Arc<dyn CategoryRepository>,
    config: BatchServiceConfig,
}

impl BatchService {
    pub fn new(
        batches: Arc<dyn BatchRepository>,
        categories: Arc<dyn CategoryRepository>,
        config: BatchServiceConfig,
    ) -> Self {
        Self {
            batches,
            categories,
            config,
        }
    }

    /// All batches, newest import first
    pub async fn list(&self) -> DomainResult<Vec<ImportBatch>> {
        self.batches.list().await
    }

    pub async fn get(&self, id: i64) -> DomainResult<ImportBatch> {
        self.batches
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Batch"))
    }

    /// Validate a batch and persist it together with one product per unit
    pub async fn create(&self, request: CreateBatch) -> DomainResult<ImportBatch> {
        if request.quantity <= 0 {
            return Err(DomainError::validation("Quantity must be greater than 0"));
        }
        if request.quantity > MAX_BATCH_QUANTITY {
            return Err(DomainError::validation(format!(
                "Quantity must be at most {}",
                MAX_BATCH_QUANTITY
            )));
        }
        if request.import_price < 0 {
            return Err(DomainError::validation("Import price must not be negative"));
        }
        if request.selling_price.map_or(false, |p| p < 0) {
            return Err(DomainError::validation("Selling price must not be negative"));
        }
        if request.import_price > MAX_UNIT_AMOUNT
            || request.selling_price.map_or(false, |p| p > MAX_UNIT_AMOUNT)
        {
            return Err(DomainError::validation(format!(
                "Prices must be at most {}",
                MAX_UNIT_AMOUNT
            )));
        }

        let category = self
            .categories
            .find_by_id(request.category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category"))?;
        if !category.is_active {
            return Err(DomainError::business_rule(format!(
                "Category {} is inactive",
                category.name
            )));
        }

        let now = Utc::now();
        let batch_code = match request.batch_code.as_deref().map(normalize_identifier) {
            Some(code) if !code.is_empty() => {
                if !is_valid_identifier(&code) {
                    return Err(DomainError::validation(format!("Invalid batch code: {}", code)));
                }
                code
            }
            _ => numbering::batch_code(&self.config.batch_prefix, now, self.config.timezone),
        };

        let identifiers = match request.identifiers {
            Some(list) if !list.is_empty() => check_identifiers(list, request.quantity)?,
            _ => generate_serials(&batch_code, request.quantity)?,
        };

        let product_name = request
            .product_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| category.name.clone());

        let batch = self
            .batches
            .create(NewBatch {
                batch_code,
                category_id: category.id,
                import_price: request.import_price,
                selling_price: request.selling_price,
                import_date: request.import_date.unwrap_or(now),
                supplier: trimmed(request.supplier),
                notes: trimmed(request.notes),
                product_name,
                identifiers,
            })
            .await?;

        info!(
            batch_id = batch.id,
            batch_code = %batch.batch_code,
            quantity = batch.quantity,
            "Import batch created"
        );
        Ok(batch)
    }
}

/// `{code}-001` onwards; the last serial is the longest, so checking it
/// covers the whole batch
fn generate_serials(batch_code: &str, quantity: i64) -> DomainResult<Vec<String>> {
    let serials: Vec<String> = (1..=quantity as usize)
        .map(|i| numbering::unit_serial(batch_code, i))
        .collect();
    if serials.last().map_or(false, |s| !is_valid_identifier(s)) {
        return Err(DomainError::validation(format!(
            "Batch code {} is too long to derive unit serials",
            batch_code
        )));
    }
    Ok(serials)
}

fn check_identifiers(list: Vec<String>, quantity: i64) -> DomainResult<Vec<String>> {
    if list.len() as i64 != quantity {
        return Err(DomainError::validation(format!(
            "Expected {} identifiers, got {}",
            quantity,
            list.len()
        )));
    }

    let mut seen = HashSet::with_capacity(list.len());
    let mut identifiers = Vec::with_capacity(list.len());
    for raw in list {
        let identifier = normalize_identifier(&raw);
        if !is_valid_identifier(&identifier) {
            return Err(DomainError::validation(format!(
                "Invalid product identifier: {}",
                raw.trim()
            )));
        }
        if !seen.insert(identifier.clone()) {
            return Err(DomainError::validation(format!(
                "Duplicate identifier: {}",
                identifier
            )));
        }
        if identifier.len() == 15
            && identifier.bytes().all(|b| b.is_ascii_digit())
            && !imei_checksum_ok(&identifier)
        {
            warn!(imei = %identifier, "IMEI fails checksum, accepting as entered");
        }
        identifiers.push(identifier);
    }
    Ok(identifiers)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
