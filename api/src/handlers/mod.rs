pub mod error;

use actix_web::HttpResponse;
use serde::Serialize;
use wh_shared::ApiResponse;

pub use error::ApiError;

pub type ApiResult = Result<HttpResponse, ApiError>;

/// 200 with `data`
pub fn ok<T: Serialize>(data: T) -> ApiResult {
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

/// 201 with `data` and a confirmation message
pub fn created<T: Serialize>(data: T, message: &str) -> ApiResult {
    Ok(HttpResponse::Created().json(ApiResponse::success(data).with_message(message)))
}

/// 200 with `data` and a confirmation message
pub fn ok_with<T: Serialize>(data: T, message: &str) -> ApiResult {
    Ok(HttpResponse::Ok().json(ApiResponse::success(data).with_message(message)))
}
