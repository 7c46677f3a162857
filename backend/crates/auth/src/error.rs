//! Auth Error Types
//!
//! Auth-specific error variants rendered through the unified
//! `kernel::error::AppError` body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldError},
    kind::ErrorKind,
};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed field validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Request body was not a JSON object of the expected shape
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Unknown email, wrong password, or role mismatch on login
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists with this email address")]
    DuplicateEmail,

    /// Forgot-password for an email with no account
    #[error("User does not exist with this email address")]
    UserNotFound,

    /// Reset token unknown, already used, or expired
    #[error("Invalid password reset token")]
    InvalidResetToken,

    /// Missing, malformed, unknown, or expired access token
    #[error("Unauthorized access")]
    Unauthorized,

    /// Authenticated, but not an admin
    #[error("Admin access required")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidCredentials
            | AuthError::DuplicateEmail
            | AuthError::InvalidResetToken => ErrorKind::UnprocessableEntity,
            AuthError::MalformedBody(_) => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the log; the body only says what the
    /// client can act on.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors),
            AuthError::Database(e) => AppError::from(e),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            AuthError::MalformedBody(_) => AppError::bad_request("Malformed request body")
                .with_action("Send a JSON object with the documented fields"),
            AuthError::Unauthorized => AppError::unauthorized("Unauthorized access")
                .with_action("Send a valid access token as 'Authorization: Bearer <token>'"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidResetToken => {
                tracing::warn!("Invalid password reset attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Non-admin access to admin route");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    /// Value objects report client mistakes as 422 `AppError`s; anything
    /// else reaching here is a server fault.
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::UnprocessableEntity => AuthError::Validation(vec![FieldError::new(
                "body",
                err.message().to_owned(),
            )]),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::MalformedBody(rejection.body_text())
    }
}
