use actix_web::web;

use crate::app::AppState;
use crate::dto::ChartQuery;
use crate::handlers::{ok, ApiResult};

pub async fn overview(state: web::Data<AppState>) -> ApiResult {
    ok(state.dashboard.overview().await?)
}

pub async fn batches(state: web::Data<AppState>) -> ApiResult {
    ok(state.dashboard.batch_summaries().await?)
}

/// GET /api/dashboard/revenue-chart?days=N
///
/// One point per business date ending today, zero-filled.
pub async fn revenue_chart(state: web::Data<AppState>, query: web::Query<ChartQuery>) -> ApiResult {
    ok(state.dashboard.revenue_chart(query.days).await?)
}
