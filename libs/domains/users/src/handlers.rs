use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, IssuedToken, JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, StoreErrorResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::LoginRequest;
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "auth";

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(
        schemas(LoginRequest, IssuedToken),
        responses(BadRequestValidationResponse, UnauthorizedResponse, StoreErrorResponse)
    ),
    tags(
        (name = TAG, description = "Login and token issuing")
    )
)]
pub struct ApiDoc;

pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtAuth,
}

/// Create the public auth router
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt: JwtAuth) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(Arc::new(AuthState { service, jwt }))
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = IssuedToken),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = StoreErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = match state.service.authenticate(&input.username, &input.password).await {
        Ok(user) => user,
        Err(err) => {
            AuditEvent::new(
                None,
                "auth.login",
                Some(format!("user:{}", input.username)),
                AuditOutcome::Failure,
            )
            .with_ip(extract_ip_from_headers(&headers))
            .with_user_agent(extract_user_agent(&headers))
            .log();
            return Err(err.into());
        }
    };

    let token = state.jwt.issue_token(user.id, &user.username)?;

    AuditEvent::new(
        Some(user.id.to_string()),
        "auth.login",
        Some(format!("user:{}", user.username)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "expires_at": token.expires_at }))
    .log();

    Ok((StatusCode::OK, Json(token)))
}
