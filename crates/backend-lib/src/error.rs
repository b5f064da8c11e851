// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use ticklist_common::Envelope;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("username or password must not be empty")]
    CredentialsRequired,

    #[error("user already exists")]
    UserExists,

    #[error("user does not exist")]
    UserNotFound,

    #[error("wrong password")]
    PasswordMismatch,

    #[error("password must not be empty")]
    PasswordRequired,

    #[error("theme must not be empty")]
    ThemeRequired,

    #[error("category name must not be empty")]
    CategoryNameRequired,

    #[error("category name already exists")]
    CategoryNameExists,

    #[error("category id must not be empty")]
    CategoryIdRequired,

    #[error("category does not exist")]
    CategoryNotFound,

    #[error("todo title must not be empty")]
    TitleRequired,

    #[error("todo does not exist")]
    TodoNotFound,

    #[error("missing token")]
    TokenMissing,

    #[error("invalid token")]
    TokenInvalid,

    #[error("failed to generate token")]
    TokenCreation,

    #[error("no permission to access this resource")]
    NotOwner,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("cascade delete incomplete: {0}")]
    Cascade(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// HTTP status code for this error.
    ///
    /// Token failures from the access gate return a 200 status with a
    /// failure envelope; clients read the envelope `code`, not the
    /// transport status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::TokenMissing | AppError::TokenInvalid => StatusCode::OK,
            AppError::CredentialsRequired
            | AppError::PasswordRequired
            | AppError::ThemeRequired
            | AppError::CategoryNameRequired
            | AppError::CategoryIdRequired
            | AppError::TitleRequired
            | AppError::InvalidParameter => StatusCode::BAD_REQUEST,
            AppError::PasswordMismatch | AppError::UserNotFound | AppError::NotOwner => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the failure envelope. Storage and signing
    /// failures collapse to a generic message; their detail only goes
    /// to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Storage(_) | AppError::Cascade(_) | AppError::TokenCreation => {
                "system error, please try again later".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            AppError::Storage(_) | AppError::Cascade(_) | AppError::TokenCreation
        ) {
            tracing::error!(error = %self, "request failed");
        }

        let status = self.status_code();
        let body: Envelope<()> = Envelope::fail(self.public_message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::TokenInvalid.to_string(), "invalid token");
        assert_eq!(
            AppError::CategoryNameExists.to_string(),
            "category name already exists"
        );
        assert!(AppError::Storage("boom".to_string())
            .to_string()
            .contains("boom"));
    }

    #[test]
    fn test_app_error_status_codes() {
        // Gate failures keep a success-range transport status.
        assert_eq!(AppError::TokenMissing.status_code(), StatusCode::OK);
        assert_eq!(AppError::TokenInvalid.status_code(), StatusCode::OK);

        assert_eq!(
            AppError::CategoryNameRequired.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PasswordMismatch.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NotOwner.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::TodoNotFound.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Storage("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = AppError::Storage("lock poisoned at shard 3".to_string());
        assert_eq!(err.public_message(), "system error, please try again later");

        let err = AppError::TodoNotFound;
        assert_eq!(err.public_message(), "todo does not exist");
    }

    #[test]
    fn test_app_error_into_response() {
        let response = AppError::TokenInvalid.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = AppError::TitleRequired.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
