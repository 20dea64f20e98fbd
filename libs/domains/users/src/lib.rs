//! Users Domain
//!
//! Operator accounts for the fleet service.
//!
//! # Features
//!
//! - Account provisioning with Argon2 password hashing
//! - Username/password login issuing a stateless JWT
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /login
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← password hashing, credential checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars", 48).unwrap());
//! let service = UserService::new(InMemoryUserRepository::new());
//!
//! let router = handlers::router(service, auth);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{CreateUser, LoginRequest, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
