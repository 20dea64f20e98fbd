//! Handler tests for the Rides domain
//!
//! The rides router runs behind the bearer-token middleware with in-memory
//! ride and trip stores.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Router, middleware};
use axum_helpers::{JwtAuth, JwtConfig, jwt_auth_middleware};
use chrono::{Duration, Utc};
use domain_rides::*;
use domain_trips::{InMemoryTripRepository, PricingEngine, TripInput, TripRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

const SECRET: &str = "rides-handler-test-secret-0123456789abcdef";

struct TestApp {
    router: Router,
    token: String,
    trips: InMemoryTripRepository,
}

impl TestApp {
    fn new() -> Self {
        let auth = JwtAuth::new(&JwtConfig::new(SECRET, 48).unwrap());
        let trips = InMemoryTripRepository::new();
        let rides = InMemoryRideRepository::new(trips.clone());

        let router = Router::new()
            .nest("/rides", handlers::router(RideService::new(rides, trips.clone())))
            .layer(middleware::from_fn_with_state(
                auth.clone(),
                jwt_auth_middleware,
            ));
        let token = auth.issue_token(Uuid::now_v7(), "dispatcher").unwrap().token;

        Self { router, token, trips }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn book(&self, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/rides")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn list(&self) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri("/rides")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

fn booking(days_ahead: i64, client_name: &str) -> Value {
    json!({
        "ride_date": Utc::now() + Duration::days(days_ahead),
        "client_name": client_name,
        "client_phone": "555-0100"
    })
}

#[tokio::test]
async fn test_rides_require_a_token() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Request::builder().uri("/rides").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_book_ride_starts_scheduled() {
    let app = TestApp::new();

    let (status, body) = app.book(booking(2, "Ana Torres")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["client_name"], "Ana Torres");
    assert!(body["client_email"].is_null());
}

#[tokio::test]
async fn test_blank_client_name_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.book(booking(2, "   ")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("client_name is required"));
}

#[tokio::test]
async fn test_missing_phone_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .book(json!({
            "ride_date": Utc::now(),
            "client_name": "Ana"
        }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_trip_reference_is_rejected() {
    let app = TestApp::new();

    let mut body = booking(2, "Ana");
    body["trip_id"] = json!(Uuid::now_v7());
    let (status, _) = app.book(body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, rides) = app.list().await;
    assert_eq!(rides.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_listing_orders_by_ride_date_and_includes_trip_total() {
    let app = TestApp::new();
    let breakdown = PricingEngine::calculate(&TripInput::new(100.0, 30.0, 600.0)).unwrap();
    let trip = app.trips.insert(Uuid::now_v7(), breakdown).await.unwrap();

    let mut linked = booking(9, "Later");
    linked["trip_id"] = json!(trip.id);
    assert_eq!(app.book(linked).await.0, StatusCode::CREATED);
    assert_eq!(app.book(booking(1, "Sooner")).await.0, StatusCode::CREATED);

    let (status, body) = app.list().await;

    assert_eq!(status, StatusCode::OK);
    let rides = body.as_array().unwrap();
    assert_eq!(rides.len(), 2);
    assert_eq!(rides[0]["client_name"], "Sooner");
    assert!(rides[0]["trip_total"].is_null());
    assert_eq!(rides[1]["client_name"], "Later");
    assert_eq!(rides[1]["trip_total"], json!(breakdown.grand_total));
}
