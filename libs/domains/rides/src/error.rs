use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_trips::TripError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RideError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type RideResult<T> = Result<T, RideError>;

impl From<sea_orm::DbErr> for RideError {
    fn from(err: sea_orm::DbErr) -> Self {
        RideError::Store(format!("Database error: {}", err))
    }
}

impl From<TripError> for RideError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Validation(msg) => RideError::Validation(msg),
            other => RideError::Store(other.to_string()),
        }
    }
}

impl From<RideError> for AppError {
    fn from(err: RideError) -> Self {
        match err {
            RideError::Validation(msg) => AppError::BadRequest(msg),
            RideError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl IntoResponse for RideError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
