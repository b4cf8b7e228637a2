//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The middleware only depends on the `SessionValidator` port, so tests swap
//! in `MockSessionValidator` without touching the routes.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates `Authorization: Bearer <token>` and injects the user.
///
/// A request without a bearer token passes through untouched; `RequireAuth`
/// rejects it later. A token that fails validation is rejected here.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_error_response(&e),
    }
}

fn auth_error_response(error: &AuthError) -> Response {
    let (status, message) = match error {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!("Auth service unavailable: {}", msg);
            (StatusCode::SERVICE_UNAVAILABLE, "Authentication service unavailable")
        }
    };

    ErrorResponse::new("AUTH_ERROR", message).into_response_with(status)
}

/// Extractor that requires an authenticated learner.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => ErrorResponse::unauthorized("Authentication required")
                .into_response_with(StatusCode::UNAUTHORIZED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(RequireAuth(user): RequireAuth) -> String {
        user.id.to_string()
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let response = app(MockSessionValidator::new().with_test_user("tok", "learner-1"))
            .oneshot(request(Some("Bearer tok")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"learner-1");
    }

    #[tokio::test]
    async fn missing_token_is_rejected_by_extractor() {
        let response = app(MockSessionValidator::new())
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_by_middleware() {
        let response = app(MockSessionValidator::new().with_test_user("tok", "learner-1"))
            .oneshot(request(Some("Bearer nope")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_ignored() {
        let response = app(MockSessionValidator::new().with_test_user("tok", "learner-1"))
            .oneshot(request(Some("Basic dXNlcjpwYXNz")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn validator_outage_is_503() {
        let validator = MockSessionValidator::new()
            .with_error(AuthError::service_unavailable("identity provider down"));

        let response = app(validator).oneshot(request(Some("Bearer tok"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request = axum::http::Request::builder().uri("/x").body(()).unwrap();
        request
            .extensions_mut()
            .insert(AuthenticatedUser::new(UserId::new("learner-9").unwrap(), None));
        let (mut parts, _) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id.as_str(), "learner-9");
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
    }
}
