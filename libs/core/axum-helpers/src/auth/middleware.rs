use super::jwt::{AuthError, JwtAuth};
use super::principal::Principal;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Bearer authentication middleware.
///
/// Verifies the token and inserts the resulting [`Principal`] into request
/// extensions. Missing, malformed, expired and foreign tokens all produce the
/// same `401` body.
///
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/trips", get(list_trips))
///     .layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers()).ok_or(AuthError::MissingToken)?;
    let claims = auth.verify_token(token)?;
    let principal = Principal::try_from(claims)?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{Router, body::Body, http::Request as HttpRequest, http::StatusCode, routing::get};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret-long-enough-0003", 48).unwrap())
    }

    fn app(auth: JwtAuth) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|principal: Principal| async move { principal.username }),
            )
            .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware))
    }

    fn request(authorization: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let auth = auth();
        let issued = auth.issue_token(Uuid::now_v7(), "dispatcher").unwrap();

        let response = app(auth)
            .oneshot(request(Some(&format!("Bearer {}", issued.token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_and_invalid_tokens_are_rejected_uniformly() {
        use http_body_util::BodyExt;

        let mut bodies = Vec::new();
        for header_value in [None, Some("Bearer nonsense"), Some("Token abc")] {
            let response = app(auth()).oneshot(request(header_value)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(response.into_body().collect().await.unwrap().to_bytes());
        }

        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
