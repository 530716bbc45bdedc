//! MySQL implementation of the SalesRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;

use wh_core::domain::entities::sale::{
    invoice_totals, NewSale, SaleRecord, SalesInvoice, SalesInvoiceDetail,
};
use wh_core::domain::value_objects::dashboard::{SaleLedgerEntry, SalesTotals};
use wh_core::errors::DomainError;
use wh_core::repositories::SalesRepository;

use super::row::{get, is_duplicate, product_from_row, tx_execute, tx_fetch_optional, PRODUCT_COLUMNS};
use crate::database::{Database, Params};
use crate::InfrastructureError;

const INVOICE_COLUMNS: &str = "id, invoice_number, customer_name, customer_phone, payment_method, \
     total_amount, total_cost, notes, sale_date, created_at";

const DETAIL_COLUMNS: &str =
    "id, invoice_id, product_id, imei, quantity, unit_price, cost_price, line_total";

pub struct MySqlSalesRepository {
    db: Database,
}

impl MySqlSalesRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn invoice_from_row(row: &MySqlRow) -> Result<SalesInvoice, DomainError> {
        Ok(SalesInvoice {
            id: get(row, "id")?,
            invoice_number: get(row, "invoice_number")?,
            customer_name: get(row, "customer_name")?,
            customer_phone: get(row, "customer_phone")?,
            payment_method: get(row, "payment_method")?,
            total_amount: get(row, "total_amount")?,
            total_cost: get(row, "total_cost")?,
            notes: get(row, "notes")?,
            sale_date: get(row, "sale_date")?,
            created_at: get(row, "created_at")?,
        })
    }

    fn detail_from_row(row: &MySqlRow) -> Result<SalesInvoiceDetail, DomainError> {
        Ok(SalesInvoiceDetail {
            id: get(row, "id")?,
            invoice_id: get(row, "invoice_id")?,
            product_id: get(row, "product_id")?,
            imei: get(row, "imei")?,
            quantity: get(row, "quantity")?,
            unit_price: get(row, "unit_price")?,
            cost_price: get(row, "cost_price")?,
            line_total: get(row, "line_total")?,
        })
    }
}

#[async_trait]
impl SalesRepository for MySqlSalesRepository {
    async fn record_sale(&self, sale: NewSale) -> Result<SaleRecord, DomainError> {
        // Dropping the transaction on an error path rolls it back.
        let mut tx = self.db.begin().await?;

        // Lock every product row for the rest of the transaction, in id order
        // so concurrent sales sharing products cannot deadlock
        let mut lines = sale.lines.clone();
        lines.sort_by_key(|line| line.product_id);
        let mut priced = Vec::with_capacity(lines.len());
        for line in &lines {
            let row = tx_fetch_optional(
                &mut tx,
                &format!("SELECT {} FROM crm_products WHERE id = @id FOR UPDATE", PRODUCT_COLUMNS),
                &Params::new().with("id", line.product_id),
            )
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product {}", line.product_id)))?;
            let product = product_from_row(&row)?;
            priced.push(line.price_against(&product)?);
        }

        let (total_amount, total_cost) = invoice_totals(&priced)?;
        let created_at = Utc::now();
        let invoice_params = Params::new()
            .with("invoiceNumber", sale.invoice_number.as_str())
            .with("customerName", sale.customer_name.clone())
            .with("customerPhone", sale.customer_phone.clone())
            .with("paymentMethod", sale.payment_method.as_str())
            .with("totalAmount", total_amount)
            .with("totalCost", total_cost)
            .with("notes", sale.notes.clone())
            .with("saleDate", sale.sold_at)
            .with("createdAt", created_at);
        let inserted = tx_execute(
            &mut tx,
            "INSERT INTO crm_sales_invoices (invoice_number, customer_name, customer_phone, \
             payment_method, total_amount, total_cost, notes, sale_date, created_at) \
             VALUES (@invoiceNumber, @customerName, @customerPhone, @paymentMethod, \
             @totalAmount, @totalCost, @notes, @saleDate, @createdAt)",
            &invoice_params,
        )
        .await
        .map_err(|e| {
            if is_duplicate(&e, "uq_crm_sales_invoices_number") {
                DomainError::business_rule("Invoice number already exists")
            } else {
                e.into()
            }
        })?;
        let invoice_id = inserted.last_insert_id() as i64;

        let mut details = Vec::with_capacity(priced.len());
        for line in priced {
            let params = Params::new()
                .with("invoiceId", invoice_id)
                .with("productId", line.product_id)
                .with("imei", line.imei.as_str())
                .with("unitPrice", line.unit_price)
                .with("costPrice", line.cost_price)
                .with("invoiceNumber", sale.invoice_number.as_str())
                .with("soldAt", sale.sold_at);

            let detail = tx_execute(
                &mut tx,
                "INSERT INTO crm_sales_invoice_details (invoice_id, product_id, imei, quantity, \
                 unit_price, cost_price, line_total) \
                 VALUES (@invoiceId, @productId, @imei, 1, @unitPrice, @costPrice, @unitPrice)",
                &params,
            )
            .await?;

            let updated = tx_execute(
                &mut tx,
                "UPDATE crm_products SET status = 'SOLD', sold_date = @soldAt, \
                 invoice_number = @invoiceNumber WHERE id = @productId AND status = 'IN_STOCK'",
                &params,
            )
            .await?;
            if updated.rows_affected() != 1 {
                return Err(DomainError::business_rule(format!(
                    "Product {} is already sold",
                    line.imei
                )));
            }

            details.push(SalesInvoiceDetail {
                id: detail.last_insert_id() as i64,
                invoice_id,
                product_id: line.product_id,
                imei: line.imei,
                quantity: 1,
                unit_price: line.unit_price,
                cost_price: line.cost_price,
                line_total: line.unit_price,
            });
        }

        tx.commit().await.map_err(InfrastructureError::from)?;

        Ok(SaleRecord {
            invoice: SalesInvoice {
                id: invoice_id,
                invoice_number: sale.invoice_number,
                customer_name: sale.customer_name,
                customer_phone: sale.customer_phone,
                payment_method: sale.payment_method,
                total_amount,
                total_cost,
                notes: sale.notes,
                sale_date: sale.sold_at,
                created_at,
            },
            details,
        })
    }

    async fn find_invoice(&self, id: i64) -> Result<Option<SaleRecord>, DomainError> {
        let params = Params::new().with("id", id);
        let rows = self
            .db
            .execute_query(
                &format!("SELECT {} FROM crm_sales_invoices WHERE id = @id", INVOICE_COLUMNS),
                &params,
            )
            .await?;
        let invoice = match rows.first() {
            Some(row) => Self::invoice_from_row(row)?,
            None => return Ok(None),
        };

        let detail_rows = self
            .db
            .execute_query(
                &format!(
                    "SELECT {} FROM crm_sales_invoice_details WHERE invoice_id = @id ORDER BY id",
                    DETAIL_COLUMNS
                ),
                &params,
            )
            .await?;
        let details = detail_rows
            .iter()
            .map(Self::detail_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(SaleRecord { invoice, details }))
    }

    async fn list_invoices(&self, limit: i64) -> Result<Vec<SalesInvoice>, DomainError> {
        let rows = self
            .db
            .execute_query(
                &format!(
                    "SELECT {} FROM crm_sales_invoices ORDER BY sale_date DESC, id DESC LIMIT @limit",
                    INVOICE_COLUMNS
                ),
                &Params::new().with("limit", limit),
            )
            .await?;
        rows.iter().map(Self::invoice_from_row).collect()
    }

    async fn ledger_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SaleLedgerEntry>, DomainError> {
        let rows = self
            .db
            .execute_query(
                "SELECT sale_date, total_amount, total_cost FROM crm_sales_invoices \
                 WHERE sale_date >= @from AND sale_date < @to",
                &Params::new().with("from", from).with("to", to),
            )
            .await?;
        rows.iter()
            .map(|row| -> Result<SaleLedgerEntry, DomainError> {
                Ok(SaleLedgerEntry {
                    sold_at: get(row, "sale_date")?,
                    amount: get(row, "total_amount")?,
                    cost: get(row, "total_cost")?,
                })
            })
            .collect()
    }

    async fn totals(&self) -> Result<SalesTotals, DomainError> {
        let rows = self
            .db
            .execute_query(
                "SELECT COUNT(*) AS invoice_count, \
                 CAST(COALESCE(SUM(total_amount), 0) AS SIGNED) AS revenue, \
                 CAST(COALESCE(SUM(total_cost), 0) AS SIGNED) AS cost \
                 FROM crm_sales_invoices",
                &Params::new(),
            )
            .await?;
        match rows.first() {
            Some(row) => Ok(SalesTotals {
                invoice_count: get(row, "invoice_count")?,
                revenue: get(row, "revenue")?,
                cost: get(row, "cost")?,
            }),
            None => Ok(SalesTotals::default()),
        }
    }
}
