use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Principal, UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        NotFoundResponse, StoreErrorResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::aggregation::{AnalyticsReport, DailyAggregate, SummaryAggregate, TopDay};
use crate::analytics::{AggregationService, DEFAULT_PERIOD_DAYS};
use crate::error::{TripError, TripResult};
use crate::models::{
    AnalyticsQuery, ListAllTripsQuery, TripBreakdown, TripInput, TripListing, TripPage, TripRecord,
};
use crate::pagination::{DEFAULT_PAGE_SIZE, PageInfo, PageRequest};
use crate::repository::TripRepository;
use crate::service::TripService;
use crate::window::{TimeRange, TimeWindow};

const TAG: &str = "trips";
const ANALYTICS_TAG: &str = "analytics";

/// OpenAPI documentation for the Trips API
#[derive(OpenApi)]
#[openapi(
    paths(quote_trip, create_trip, list_own_trips, list_all_trips, delete_trip),
    components(
        schemas(TripInput, TripBreakdown, TripRecord, TripListing, TripPage, PageInfo),
        responses(
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            StoreErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Trip pricing and history")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the Analytics API
#[derive(OpenApi)]
#[openapi(
    paths(get_analytics),
    components(
        schemas(AnalyticsReport, SummaryAggregate, DailyAggregate, TopDay),
        responses(BadRequestValidationResponse, UnauthorizedResponse, StoreErrorResponse)
    ),
    tags(
        (name = ANALYTICS_TAG, description = "Revenue analytics over time windows")
    )
)]
pub struct AnalyticsApiDoc;

/// Create the trips router. Every route expects an authenticated [`Principal`].
pub fn router<R: TripRepository + 'static>(service: TripService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own_trips).post(create_trip))
        .route("/quote", post(quote_trip))
        .route("/all", get(list_all_trips))
        .route("/{id}", delete(delete_trip))
        .with_state(shared_service)
}

/// Create the analytics router
pub fn analytics_router<R: TripRepository + 'static>(service: AggregationService<R>) -> Router {
    Router::new()
        .route("/", get(get_analytics))
        .with_state(Arc::new(service))
}

/// Price a trip without saving it
#[utoipa::path(
    post,
    path = "/quote",
    tag = TAG,
    request_body = TripInput,
    responses(
        (status = 200, description = "Rounded cost breakdown", body = TripBreakdown),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn quote_trip<R: TripRepository>(
    State(service): State<Arc<TripService<R>>>,
    _principal: Principal,
    ValidatedJson(input): ValidatedJson<TripInput>,
) -> TripResult<Json<TripBreakdown>> {
    Ok(Json(service.quote(&input)?))
}

/// Price and save a trip for the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = TripInput,
    responses(
        (status = 201, description = "Trip saved", body = TripRecord),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_trip<R: TripRepository>(
    State(service): State<Arc<TripService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<TripInput>,
) -> TripResult<impl IntoResponse> {
    let trip = service.create_trip(principal.id, &input).await?;

    AuditEvent::new(
        Some(principal.id.to_string()),
        "trip.create",
        Some(format!("trip:{}", trip.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "distance_km": trip.breakdown.distance_km,
        "grand_total": trip.breakdown.grand_total,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(trip)))
}

/// List the caller's own trips, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Caller's trips", body = Vec<TripRecord>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_own_trips<R: TripRepository>(
    State(service): State<Arc<TripService<R>>>,
    principal: Principal,
) -> TripResult<Json<Vec<TripRecord>>> {
    let trips = service.list_own_trips(principal.id).await?;
    Ok(Json(trips))
}

/// Page through every trip, optionally restricted to a date range
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(ListAllTripsQuery),
    responses(
        (status = 200, description = "One page of trips", body = TripPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_all_trips<R: TripRepository>(
    State(service): State<Arc<TripService<R>>>,
    _principal: Principal,
    ValidatedQuery(query): ValidatedQuery<ListAllTripsQuery>,
) -> TripResult<Json<TripPage>> {
    let request = PageRequest::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;
    let range = TimeRange::from_dates(query.start_date, query.end_date)?;

    let page = service.list_trips_page(range, request).await?;
    Ok(Json(page))
}

/// Delete one of the caller's trips
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Trip ID")
    ),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_trip<R: TripRepository>(
    State(service): State<Arc<TripService<R>>>,
    principal: Principal,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> TripResult<impl IntoResponse> {
    let result = service.delete_trip(id, principal.id).await;

    let outcome = match &result {
        Ok(()) => AuditOutcome::Success,
        Err(TripError::Forbidden(_)) => AuditOutcome::Denied,
        Err(_) => AuditOutcome::Failure,
    };
    AuditEvent::new(
        Some(principal.id.to_string()),
        "trip.delete",
        Some(format!("trip:{}", id)),
        outcome,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    result?;
    Ok(StatusCode::NO_CONTENT)
}

/// Revenue analytics for a trailing period or an explicit date range
#[utoipa::path(
    get,
    path = "",
    tag = ANALYTICS_TAG,
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Summary, daily stats and top days", body = AnalyticsReport),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_analytics<R: TripRepository>(
    State(service): State<Arc<AggregationService<R>>>,
    _principal: Principal,
    ValidatedQuery(query): ValidatedQuery<AnalyticsQuery>,
) -> TripResult<Json<AnalyticsReport>> {
    let window = TimeWindow::from_query(
        query.period,
        query.start_date,
        query.end_date,
        DEFAULT_PERIOD_DAYS,
    );

    let report = service.report(window, Utc::now()).await?;
    Ok(Json(report))
}
