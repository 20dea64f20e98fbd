use super::config::{JwtConfig, MAX_TTL_HOURS};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// Message returned for every rejected token, whatever the cause.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or missing credentials";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,      // Principal (user) ID
    pub username: String, // Login name
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
    pub jti: String,      // Token ID
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No bearer token provided")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) => AppError::InternalServerError(msg),
            other => {
                tracing::debug!(reason = %other, "Rejected credentials");
                AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
        }
    }
}

/// Stateless HS256 token issuer/verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            // `JwtConfig::new` already bounds the lifetime; fields set by hand are clamped
            ttl: Duration::try_hours(config.ttl_hours.clamp(1, MAX_TTL_HOURS))
                .unwrap_or_else(|| Duration::hours(MAX_TTL_HOURS)),
        }
    }

    /// Issue a token for `principal_id`, valid for the configured lifetime.
    pub fn issue_token(&self, principal_id: Uuid, username: &str) -> Result<IssuedToken, AuthError> {
        self.issue_token_at(principal_id, username, Utc::now())
    }

    pub(crate) fn issue_token_at(
        &self,
        principal_id: Uuid,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Signing("token expiry is out of range".to_string()))?;

        let claims = JwtClaims {
            sub: principal_id.to_string(),
            username: username.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        // Second precision, matching what the token itself carries
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or(expires_at);

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(e.to_string()),
            })
    }
}
