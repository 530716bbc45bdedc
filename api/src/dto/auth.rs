use serde::{Deserialize, Serialize};
use wh_core::WarehouseUser;

use crate::middleware::AuthContext;

/// Body of `POST /api/auth/warehouse-login`
///
/// Blank fields are rejected by the auth service, so both default to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `GET /api/auth/me`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub user: WarehouseUser,
    pub permissions: Vec<String>,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl CurrentUserResponse {
    pub fn new(user: WarehouseUser, auth: AuthContext) -> Self {
        Self {
            user,
            permissions: auth.claims.permissions,
            issued_at: auth.claims.iat,
            expires_at: auth.claims.exp,
        }
    }
}
