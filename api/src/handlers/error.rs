//! Conversion of failures into the response envelope.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; actix renders the
//! error through [`ResponseError`], which is also where it gets logged.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::{ValidationErrors, ValidationErrorsKind};
use wh_core::errors::DomainError;
use wh_shared::ApiResponse;

const VALIDATION_FAILED: &str = "Validation failed";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// DTO constraint violations, one message per failed rule
    #[error("Validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),

    /// Body, query string or path segment that could not be parsed
    #[error("{0}")]
    BadRequest(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        ApiError::Invalid(messages)
    }
}

/// Field messages in field-name order, descending into nested structs and lists
fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errors) => {
                messages.extend(errors.iter().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, e.code),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Validation { .. })
            | ApiError::Domain(DomainError::BusinessRule { .. })
            | ApiError::Invalid(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Unauthorized { .. }) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(DomainError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        HttpResponse::build(status).json(self.envelope())
    }
}

impl ApiError {
    fn envelope(&self) -> ApiResponse<()> {
        match self {
            ApiError::Domain(DomainError::Internal { message }) => {
                ApiResponse::error("Internal server error").with_details(message.clone())
            }
            ApiError::Domain(err) => ApiResponse::error(err.client_message()),
            ApiError::Invalid(messages) => {
                ApiResponse::error(VALIDATION_FAILED).with_message(messages.join("; "))
            }
            ApiError::BadRequest(message) => ApiResponse::error(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_domain_errors_map_to_status() {
        let cases = [
            (DomainError::validation("bad"), 400),
            (DomainError::business_rule("Category name already exists"), 400),
            (DomainError::unauthorized("Invalid token"), 401),
            (DomainError::not_found("Category"), 404),
            (DomainError::internal("boom"), 500),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code().as_u16(), expected);
        }
    }

    #[actix_web::test]
    async fn test_internal_error_hides_message_in_error_field() {
        let (status, body) =
            body_of(DomainError::internal("pool timed out after 30s").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["details"], "pool timed out after 30s");
    }

    #[actix_web::test]
    async fn test_not_found_envelope() {
        let (status, body) = body_of(DomainError::not_found("Batch").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Batch not found");
        assert!(body.get("details").is_none());
    }

    #[actix_web::test]
    async fn test_validation_messages_joined() {
        let err = ApiError::Invalid(vec!["quantity out of range".into(), "name too long".into()]);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["message"], "quantity out of range; name too long");
    }
}
