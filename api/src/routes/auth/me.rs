use actix_web::web;

use crate::app::AppState;
use crate::dto::CurrentUserResponse;
use crate::handlers::{ok, ApiResult};
use crate::middleware::AuthContext;

/// Handler for GET /api/auth/me
///
/// Requires authentication. Fails with 401 when the account behind the token
/// has since been removed or disabled.
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let user = state.auth.current_user(&auth.claims)?;
    ok(CurrentUserResponse::new(user, auth))
}
