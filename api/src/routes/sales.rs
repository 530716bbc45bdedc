//! `/api/sales`

use actix_web::web;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CreateSaleRequest, LimitQuery};
use crate::handlers::{created, ok, ApiResult};
use crate::middleware::AuthContext;

/// GET /api/sales?limit=N, newest first
pub async fn list(state: web::Data<AppState>, query: web::Query<LimitQuery>) -> ApiResult {
    ok(state.sales.list_invoices(query.limit).await?)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    ok(state.sales.get_invoice(id.into_inner()).await?)
}

/// POST /api/sales
///
/// Writes the invoice, its lines and the SOLD transitions atomically.
/// A product that is already sold fails the whole sale with 400.
pub async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateSaleRequest>,
) -> ApiResult {
    request.validate()?;
    let record = state.sales.record_sale(request.into_inner().into()).await?;
    tracing::info!(
        cashier = %auth.claims.username,
        invoice_number = %record.invoice.invoice_number,
        "Sale recorded"
    );
    created(record, "Sale recorded")
}
