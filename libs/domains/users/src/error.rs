use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, auth::jwt::UNAUTHORIZED_MESSAGE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Store(format!("Database error: {}", err))
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUsername(username) => {
                AppError::Conflict(format!("User '{}' already exists", username))
            }
            // Unknown user and wrong password are indistinguishable to the caller
            UserError::InvalidCredentials => {
                AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
