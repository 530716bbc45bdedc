//! `/api/cable-batches`

use actix_web::web;
use validator::Validate;

use crate::app::AppState;
use crate::dto::CreateBatchRequest;
use crate::handlers::{created, ok, ApiResult};

pub async fn list(state: web::Data<AppState>) -> ApiResult {
    ok(state.batches.list().await?)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    ok(state.batches.get(id.into_inner()).await?)
}

/// POST /api/cable-batches
///
/// Creates the batch and one IN_STOCK product per unit. Units take the
/// `imeis` given in the body, or generated serials when none are sent.
pub async fn create(
    state: web::Data<AppState>,
    request: web::Json<CreateBatchRequest>,
) -> ApiResult {
    request.validate()?;
    let command = request.into_inner().into_command(state.timezone);
    let batch = state.batches.create(command).await?;
    created(batch, "Batch created")
}
