use actix_web::web;

use crate::app::AppState;
use crate::dto::LimitQuery;
use crate::handlers::{ok, ApiResult};

/// GET /api/products-available?limit=N, oldest stock first
pub async fn available(state: web::Data<AppState>, query: web::Query<LimitQuery>) -> ApiResult {
    ok(state.products.available(query.limit).await?)
}

pub async fn by_batch(state: web::Data<AppState>, batch_id: web::Path<i64>) -> ApiResult {
    ok(state.products.by_batch(batch_id.into_inner()).await?)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    ok(state.products.get(id.into_inner()).await?)
}

/// GET /api/products/imei/{imei}, used by the POS scanner
pub async fn by_imei(state: web::Data<AppState>, imei: web::Path<String>) -> ApiResult {
    ok(state.products.by_imei(&imei).await?)
}
