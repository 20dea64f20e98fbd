use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::jwt::{AuthError, JwtClaims, UNAUTHORIZED_MESSAGE};
use crate::errors::AppError;

/// The authenticated caller, as established by [`super::jwt_auth_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
}

impl TryFrom<JwtClaims> for Principal {
    type Error = AuthError;

    fn try_from(claims: JwtClaims) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::Invalid("subject is not a UUID".to_string()))?;

        Ok(Self {
            id,
            username: claims.username,
        })
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
    }
}
