use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Trip not found: {0}")]
    NotFound(Uuid),

    #[error("Trip {0} belongs to another user")]
    Forbidden(Uuid),

    #[error("Store error: {0}")]
    Store(String),
}

pub type TripResult<T> = Result<T, TripError>;

impl From<sea_orm::DbErr> for TripError {
    fn from(err: sea_orm::DbErr) -> Self {
        TripError::Store(format!("Database error: {}", err))
    }
}

impl From<TripError> for AppError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Validation(msg) => AppError::BadRequest(msg),
            TripError::NotFound(id) => AppError::NotFound(format!("Trip {} not found", id)),
            TripError::Forbidden(id) => {
                AppError::Forbidden(format!("Access denied to trip {}", id))
            }
            TripError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl IntoResponse for TripError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
