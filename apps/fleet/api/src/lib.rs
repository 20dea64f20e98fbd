//! Fleet API
//!
//! HTTP service for trip pricing, revenue analytics and ride bookings.
//!
//! ```text
//! /api/auth       public    login → bearer token
//! /api/trips      bearer    quote, create, list, delete
//! /api/analytics  bearer    summary, daily stats, top days
//! /api/rides      bearer    book and list upcoming rides
//! /health /ready            liveness and database readiness
//! ```

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;
