//! Row decoding and transaction helpers shared by the repositories.

use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::{Decode, MySql, Row, Transaction, Type};
use wh_core::domain::entities::product::{Product, ProductStatus};
use wh_core::errors::DomainError;

use crate::database::{NamedQuery, Params};
use crate::InfrastructureError;

pub(crate) type Tx = Transaction<'static, MySql>;

pub(crate) fn get<'r, T>(row: &'r MySqlRow, column: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(column).map_err(|e| DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, e),
    })
}

/// True for a duplicate-key error on the index whose name contains `index`
pub(crate) fn is_duplicate(err: &InfrastructureError, index: &str) -> bool {
    match err {
        InfrastructureError::Database(sqlx::Error::Database(db)) => {
            db.is_unique_violation() && db.message().contains(index)
        }
        _ => false,
    }
}

pub(crate) async fn tx_execute(
    tx: &mut Tx,
    text: &str,
    params: &Params,
) -> Result<MySqlQueryResult, InfrastructureError> {
    let query = NamedQuery::new(text, params)?;
    Ok(query.query().execute(&mut **tx).await?)
}

pub(crate) async fn tx_fetch_optional(
    tx: &mut Tx,
    text: &str,
    params: &Params,
) -> Result<Option<MySqlRow>, InfrastructureError> {
    let query = NamedQuery::new(text, params)?;
    Ok(query.query().fetch_optional(&mut **tx).await?)
}

pub(crate) const PRODUCT_COLUMNS: &str = "id, imei, name, batch_id, category_id, import_price, \
     selling_price, status, sold_date, invoice_number, created_at";

pub(crate) fn product_from_row(row: &MySqlRow) -> Result<Product, DomainError> {
    let status: String = get(row, "status")?;
    Ok(Product {
        id: get(row, "id")?,
        imei: get(row, "imei")?,
        name: get(row, "name")?,
        batch_id: get(row, "batch_id")?,
        category_id: get(row, "category_id")?,
        import_price: get(row, "import_price")?,
        selling_price: get(row, "selling_price")?,
        status: status.parse::<ProductStatus>().map_err(DomainError::internal)?,
        sold_date: get(row, "sold_date")?,
        invoice_number: get(row, "invoice_number")?,
        created_at: get(row, "created_at")?,
    })
}
