//! Authentication service module
//!
//! Dashboard users come from configuration with bcrypt password hashes;
//! a successful login yields a signed session token.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
