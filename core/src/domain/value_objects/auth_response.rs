//! Login response value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::WarehouseUser;

/// Returned by a successful warehouse login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Bearer JWT for subsequent requests
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    pub user: WarehouseUser,
}
