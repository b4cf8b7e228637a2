//! HTTP routes for content adaptation and the learning assistant.

use axum::{routing::post, Router};

use super::handlers::{adapt_content, ask_assistant, LearningHandlers};

/// Routes under `/api`.
pub fn learning_routes(handlers: LearningHandlers) -> Router {
    Router::new()
        .route("/content/adapt", post(adapt_content))
        .route("/assistant", post(ask_assistant))
        .with_state(handlers)
}
