use actix_web::web;

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::{ok_with, ApiResult};

/// Handler for POST /api/auth/warehouse-login
///
/// # Request Body
///
/// ```json
/// { "username": "admin", "password": "..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "token": "eyJ...", "expiresIn": 86400, "user": { "id": 1, "username": "admin", ... } },
///     "message": "Login successful"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: username or password missing
/// - 401 Unauthorized: wrong credentials or disabled account
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> ApiResult {
    let LoginRequest { username, password } = request.into_inner();
    let result = state.auth.login(&username, &password).await?;
    ok_with(result, "Login successful")
}
