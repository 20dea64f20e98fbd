//! Rides Domain
//!
//! Upcoming rides booked for clients, optionally linked to a priced trip.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/rides)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ RideService │  ← required fields, linked-trip existence
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───┐ ┌─▼──────────────┐
//! │ Ride │ │ TripRepository │  ← from domain_trips
//! │ Repo │ └────────────────┘
//! └──────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_rides::{handlers, InMemoryRideRepository, RideService};
//! use domain_trips::InMemoryTripRepository;
//!
//! let trips = InMemoryTripRepository::new();
//! let rides = InMemoryRideRepository::new(trips.clone());
//!
//! let router = handlers::router(RideService::new(rides, trips));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RideError, RideResult};
pub use models::{CreateRide, Ride, RideStatus, RideView};
pub use postgres::PgRideRepository;
pub use repository::{InMemoryRideRepository, RideRepository};
pub use service::RideService;
