//! `/api/categories`

use actix_web::web;
use serde_json::json;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CategoryListQuery, CreateCategoryRequest, UpdateCategoryRequest};
use crate::handlers::{created, ok, ok_with, ApiResult};

/// GET /api/categories?isActive=true|false, ordered by name
pub async fn list(state: web::Data<AppState>, query: web::Query<CategoryListQuery>) -> ApiResult {
    let categories = state.categories.list(query.is_active()?).await?;
    ok(categories)
}

pub async fn get(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    ok(state.categories.get(id.into_inner()).await?)
}

/// POST /api/categories
///
/// 201 with the inserted row, 400 "Category name already exists" on a
/// duplicate name.
pub async fn create(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
) -> ApiResult {
    request.validate()?;
    let category = state.categories.create(request.into_inner().into()).await?;
    created(category, "Category created")
}

pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<UpdateCategoryRequest>,
) -> ApiResult {
    request.validate()?;
    let category = state
        .categories
        .update(id.into_inner(), request.into_inner().into())
        .await?;
    ok_with(category, "Category updated")
}

/// DELETE /api/categories/{id}; refused while batches reference the category
pub async fn delete(state: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    let id = id.into_inner();
    state.categories.delete(id).await?;
    ok_with(json!({ "id": id }), "Category deleted")
}
