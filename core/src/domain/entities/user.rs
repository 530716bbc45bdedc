//! Dashboard user entity.

use serde::{Deserialize, Serialize};
use wh_shared::config::UserAccount;

/// Public profile of a signed-in dashboard user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub permissions: Vec<String>,
}

impl From<&UserAccount> for WarehouseUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            display_name: account
                .display_name
                .clone()
                .unwrap_or_else(|| account.username.clone()),
            role: account.role.clone(),
            permissions: account.permissions.clone(),
        }
    }
}
