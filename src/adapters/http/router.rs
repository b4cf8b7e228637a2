//! Top-level axum router: health check, authenticated `/api` routes, and
//! the tower-http layers shared by both.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::assessment::{assessment_routes, AssessmentHandlers};
use super::learning::{learning_routes, LearningHandlers};
use super::middleware::{auth_middleware, AuthState};

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins; any origin when empty.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(90),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// Builds the application router.
pub fn app_router(
    assessment: AssessmentHandlers,
    learning: LearningHandlers,
    validator: AuthState,
    config: &RouterConfig,
) -> Router {
    let api = Router::new()
        .merge(assessment_routes(assessment))
        .merge(learning_routes(learning))
        .layer(middleware::from_fn_with_state(validator, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(cors_layer(&config.cors_origins)),
        )
}
