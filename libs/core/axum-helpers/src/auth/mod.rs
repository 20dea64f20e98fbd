//! Authentication: stateless JWT bearer tokens.
//!
//! - [`JwtAuth`] issues and verifies HS256 tokens carrying the principal id and an expiry
//! - [`jwt_auth_middleware`] rejects requests without a valid bearer token
//! - [`Principal`] extracts the verified caller inside handlers
//!
//! Every verification failure surfaces as the same `401` response, whatever the cause.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/trips", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod principal;

pub use config::JwtConfig;
pub use jwt::{AuthError, IssuedToken, JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
pub use principal::Principal;
