use crate::domain::validation::{ValidationErrors, ValidationKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("Password hashing failed")]
    PasswordHashing,
    #[error("Authentication failed")]
    AuthError,
    #[error("Not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// True for the store-level or validator-level duplicate email signal.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Validation(errors) if errors.has_kind(ValidationKind::Duplicated))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
            Self::Validation(errors) => {
                tracing::debug!(errors = %errors, "Validation failed");
                let status = if errors.has_kind(ValidationKind::Duplicated) {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                };
                (status, errors.to_string(), Some(errors))
            }
            Self::PasswordHashing => {
                tracing::error!("Password hashing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
            Self::AuthError => {
                tracing::debug!("Authentication failed");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None)
            }
            Self::NotFound => {
                tracing::debug!("Resource not found");
                (StatusCode::NOT_FOUND, "Not found".to_string(), None)
            }
            Self::Conflict(msg) => {
                tracing::debug!(message = %msg, "Conflict");
                (StatusCode::CONFLICT, msg, None)
            }
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
        };

        let body = match fields {
            Some(errors) => Json(json!({ "error": message, "fields": errors })),
            None => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FieldError;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = AppError::from(ValidationErrors::from(FieldError::duplicated("email")));
        assert!(err.is_duplicate());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_required_maps_to_unprocessable() {
        let err = AppError::from(ValidationErrors::from(FieldError::required("name")));
        assert!(!err.is_duplicate());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_hashing_failure_is_internal() {
        assert_eq!(AppError::PasswordHashing.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::AuthError.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
