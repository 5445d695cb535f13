use crate::core::error::AppError;
use crate::features::auth::services::TokenService;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")
                .body(Body::from("Unauthorized"))
                .unwrap();

            Err(response)
        })
    }
}

/// Gate for protected routes: validates the bearer access token and injects
/// the authenticated user into request extensions.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_header[7..]; // Skip "Bearer "

    let user = tokens.validate_access_token(token)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::features::auth::model::AuthenticatedUser;
    use axum::{routing::get, Router};
    use axum_test::TestServer;
    use std::time::Duration;

    fn test_token_service() -> Arc<TokenService> {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(86400),
            jwt_leeway: Duration::from_secs(0),
        };
        // connect_lazy performs no I/O; the access-token path never touches the pool
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        Arc::new(TokenService::new(config, pool))
    }

    async fn whoami(user: AuthenticatedUser) -> String {
        user.email
    }

    fn protected_app(tokens: Arc<TokenService>) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(axum::middleware::from_fn_with_state(tokens, auth_middleware))
    }

    #[tokio::test]
    async fn missing_bearer_is_rejected() {
        let server = TestServer::new(protected_app(test_token_service())).unwrap();
        let response = server.get("/whoami").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let server = TestServer::new(protected_app(test_token_service())).unwrap();
        let response = server
            .get("/whoami")
            .authorization_bearer("not.a.token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn minted_access_token_is_accepted() {
        let tokens = test_token_service();
        let pair = tokens
            .issue_pair(Uuid::new_v4(), "alice@example.com")
            .unwrap();

        let server = TestServer::new(protected_app(tokens)).unwrap();
        let response = server
            .get("/whoami")
            .authorization_bearer(&pair.access)
            .await;
        response.assert_status_ok();
        assert_eq!(response.text(), "alice@example.com");
    }

    #[tokio::test]
    async fn refresh_token_is_not_an_access_token() {
        let tokens = test_token_service();
        let pair = tokens
            .issue_pair(Uuid::new_v4(), "alice@example.com")
            .unwrap();

        let server = TestServer::new(protected_app(tokens)).unwrap();
        let response = server
            .get("/whoami")
            .authorization_bearer(&pair.refresh)
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn injected_user_reaches_extractor() {
        let app = crate::shared::test_helpers::with_test_auth(
            Router::new().route("/whoami", get(whoami)),
        );
        let server = TestServer::new(app).unwrap();
        let response = server.get("/whoami").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "test@example.com");
    }
}
