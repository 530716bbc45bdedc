//! Token service module for JWT management
//!
//! Dashboard sessions are single HS256 access tokens; there is no refresh
//! or revocation flow.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
