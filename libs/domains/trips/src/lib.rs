//! Trips Domain
//!
//! Trip pricing, trip history and revenue analytics for the fleet service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/trips, /analytics)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────────┐
//! │ TripService / AggregationService │  ← ownership, windows, pagination
//! └──────┬──────────────────────────┘
//!        │
//! ┌──────▼──────┐   ┌───────────────┐
//! │ Repository  │   │ PricingEngine │  ← pure formula
//! └──────┬──────┘   └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_trips::{
//!     handlers,
//!     repository::InMemoryTripRepository,
//!     service::TripService,
//!     analytics::AggregationService,
//! };
//!
//! let repository = InMemoryTripRepository::new();
//! let trips = handlers::router(TripService::new(repository.clone()));
//! let analytics = handlers::analytics_router(AggregationService::new(repository));
//! ```

pub mod aggregation;
pub mod analytics;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod pricing;
pub mod repository;
pub mod service;
pub mod window;

pub use aggregation::{AnalyticsReport, DailyAggregate, SummaryAggregate, TopDay};
pub use analytics::AggregationService;
pub use error::{TripError, TripResult};
pub use models::{TripBreakdown, TripFilter, TripInput, TripListing, TripPage, TripRecord};
pub use pagination::{PageInfo, PageRequest};
pub use postgres::PgTripRepository;
pub use pricing::PricingEngine;
pub use repository::{InMemoryTripRepository, TripRepository};
pub use service::TripService;
pub use window::{TimeRange, TimeWindow};
