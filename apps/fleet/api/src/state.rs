//! Shared application state.

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

/// Cloned into routers and the shutdown hook; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    pub jwt: JwtAuth,
}

impl AppState {
    pub fn new(config: crate::config::Config, db: DatabaseConnection) -> Self {
        let jwt = JwtAuth::new(&config.jwt);
        Self { config, db, jwt }
    }
}
