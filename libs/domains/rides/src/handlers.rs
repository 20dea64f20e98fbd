use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, ValidatedJson,
    errors::responses::{BadRequestValidationResponse, StoreErrorResponse, UnauthorizedResponse},
    extract_ip_from_headers, extract_user_agent,
};
use domain_trips::TripRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RideResult;
use crate::models::{CreateRide, Ride, RideStatus, RideView};
use crate::repository::RideRepository;
use crate::service::RideService;

const TAG: &str = "rides";

/// OpenAPI documentation for the Rides API
#[derive(OpenApi)]
#[openapi(
    paths(create_ride, list_rides),
    components(
        schemas(Ride, RideView, CreateRide, RideStatus),
        responses(BadRequestValidationResponse, UnauthorizedResponse, StoreErrorResponse)
    ),
    tags(
        (name = TAG, description = "Upcoming ride bookings")
    )
)]
pub struct ApiDoc;

/// Create the rides router. Every route expects an authenticated [`Principal`].
pub fn router<R, T>(service: RideService<R, T>) -> Router
where
    R: RideRepository + 'static,
    T: TripRepository + 'static,
{
    Router::new()
        .route("/", get(list_rides).post(create_ride))
        .with_state(Arc::new(service))
}

/// Book an upcoming ride
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateRide,
    responses(
        (status = 201, description = "Ride booked", body = Ride),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_ride<R: RideRepository, T: TripRepository>(
    State(service): State<Arc<RideService<R, T>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateRide>,
) -> RideResult<impl IntoResponse> {
    let ride = service.create_ride(input).await?;

    AuditEvent::new(
        Some(principal.id.to_string()),
        "ride.create",
        Some(format!("ride:{}", ride.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "ride_date": ride.ride_date,
        "trip_id": ride.trip_id,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(ride)))
}

/// List every booked ride, soonest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Rides with linked trip totals", body = Vec<RideView>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_rides<R: RideRepository, T: TripRepository>(
    State(service): State<Arc<RideService<R, T>>>,
    _principal: Principal,
) -> RideResult<Json<Vec<RideView>>> {
    Ok(Json(service.list_rides().await?))
}
