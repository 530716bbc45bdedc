//! Authentication route handlers
//!
//! - `POST /api/auth/warehouse-login` exchanges credentials for a token
//! - `GET /api/auth/me` describes the bearer of the current token

pub mod login;
pub mod me;

pub use login::login;
pub use me::me;
