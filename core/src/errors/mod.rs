//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
///
/// The `message`/`resource` payloads are client-facing text; the API layer
/// maps each variant onto an HTTP status and places the text in the
/// response envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input (400)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Well-formed input that breaks a business rule (400)
    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    /// Referenced entity does not exist (404)
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Bad credentials or token (401)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Storage or other unexpected failure (500)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule { message: message.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Text shown to API clients in the `error` field
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::BusinessRule { message }
            | Self::Unauthorized { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_hides_internal_detail() {
        let err = DomainError::internal("connection refused (os error 111)");
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.to_string().contains("os error 111"));
    }

    #[test]
    fn test_client_message_for_not_found() {
        assert_eq!(DomainError::not_found("Category").client_message(), "Category not found");
    }

    #[test]
    fn test_client_message_passes_validation_text() {
        let err = DomainError::business_rule("Category name already exists");
        assert_eq!(err.client_message(), "Category name already exists");
    }
}
