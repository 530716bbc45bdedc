//! JWT claims carried by dashboard sessions.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::WarehouseUser;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "warehouse-admin";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub username: String,

    pub role: String,

    #[serde(default)]
    pub permissions: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates claims for a user valid for `ttl_seconds`
    pub fn for_user(user: &WarehouseUser, issuer: &str, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.clone(),
            permissions: user.permissions.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Gets the numeric user ID from the subject
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
