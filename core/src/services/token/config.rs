//! Configuration for the token service

use wh_shared::config::JwtConfig;

use crate::domain::entities::token::JWT_ISSUER;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub expiry_seconds: i64,
    /// Expected `iss` claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            expiry_seconds: 24 * 3600,
            issuer: JWT_ISSUER.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            expiry_seconds: jwt.expiry_seconds,
            issuer: jwt.issuer.clone(),
        }
    }
}
