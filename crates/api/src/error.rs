use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::errors::InvitationError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid invitation code")]
    InvalidInvitationCode,

    #[error("Too many invitations")]
    TooManyInvitations,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::InvalidInvitationCode => (
                StatusCode::BAD_REQUEST,
                "invalid_invitation_code",
                "Invalid invitation code".into(),
            ),
            ApiError::TooManyInvitations => (
                StatusCode::TOO_MANY_REQUESTS,
                "too_many_invitations",
                "Group already has the maximum number of outstanding invitations".into(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvitationError> for ApiError {
    fn from(err: InvitationError) -> Self {
        match err {
            InvitationError::Forbidden => ApiError::Forbidden(err.to_string()),
            InvitationError::TooManyInvitations => ApiError::TooManyInvitations,
            InvitationError::InvalidInvitationCode => ApiError::InvalidInvitationCode,
            // Store details stay in the server log.
            InvitationError::Server(_) | InvitationError::Transaction(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: invalid value", field),
                })
            })
            .collect();
        messages.sort();

        ApiError::Validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::errors::StoreError;
    use shared::crypto::CodeGenerationError;
    use validator::Validate;

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::InvalidInvitationCode, StatusCode::BAD_REQUEST),
            (ApiError::TooManyInvitations, StatusCode::TOO_MANY_REQUESTS),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ApiError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_from_invitation_conditions() {
        assert!(matches!(
            ApiError::from(InvitationError::Forbidden),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(InvitationError::TooManyInvitations),
            ApiError::TooManyInvitations
        ));
        assert!(matches!(
            ApiError::from(InvitationError::InvalidInvitationCode),
            ApiError::InvalidInvitationCode
        ));
    }

    #[test]
    fn test_from_transaction_failure_is_internal() {
        let err = ApiError::from(InvitationError::Transaction(StoreError::UniqueViolation {
            constraint: "group_invitations_group_email_key".into(),
        }));
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_code_generation_failure_is_internal() {
        let source = CodeGenerationError::RandomSource(rand::Error::new("no entropy"));
        let err = ApiError::from(InvitationError::Server(source));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_from_sqlx_error_is_internal() {
        let err: ApiError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_from_validation_errors() {
        let request = domain::models::CreateGroupInvitationRequest {
            email: "not-an-email".to_string(),
        };
        let err: ApiError = request.validate().unwrap_err().into();
        match err {
            ApiError::Validation(msg) => assert!(msg.starts_with("email")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::Unauthorized("test".into()).to_string(),
            "Unauthorized: test"
        );
        assert_eq!(
            ApiError::TooManyInvitations.to_string(),
            "Too many invitations"
        );
        assert_eq!(
            ApiError::InvalidInvitationCode.to_string(),
            "Invalid invitation code"
        );
    }
}
