use axum::{Router, middleware, routing::get};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use domain_rides::{PgRideRepository, RideRepository, RideService};
use domain_trips::{AggregationService, PgTripRepository, TripRepository, TripService};
use domain_users::{PgUserRepository, UserRepository, UserService};

use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix, backed by PostgreSQL.
/// The `/api` prefix is added by `create_router`.
pub fn routes(state: &AppState) -> Router {
    api_routes(
        state.jwt.clone(),
        PgUserRepository::new(state.db.clone()),
        PgTripRepository::new(state.db.clone()),
        PgRideRepository::new(state.db.clone()),
    )
}

/// Composes the domain routers over the given repositories.
///
/// `/auth` is public. Everything else sits behind the bearer middleware, so an
/// unauthenticated request never reaches a handler.
pub fn api_routes<U, T, R>(jwt: JwtAuth, users: U, trips: T, rides: R) -> Router
where
    U: UserRepository + 'static,
    T: TripRepository + Clone + 'static,
    R: RideRepository + 'static,
{
    let protected = Router::new()
        .nest(
            "/trips",
            domain_trips::handlers::router(TripService::new(trips.clone())),
        )
        .nest(
            "/analytics",
            domain_trips::handlers::analytics_router(AggregationService::new(trips.clone())),
        )
        .nest(
            "/rides",
            domain_rides::handlers::router(RideService::new(rides, trips)),
        )
        .layer(middleware::from_fn_with_state(
            jwt.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .nest(
            "/auth",
            domain_users::handlers::router(UserService::new(users), jwt),
        )
        .merge(protected)
}

/// Router with `/ready`, which pings the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
