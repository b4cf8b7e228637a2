//! HTTP routes for assessment and profile endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_profile, get_questionnaire, list_responses, submit_assessment, AssessmentHandlers,
};

/// Routes under `/api`.
pub fn assessment_routes(handlers: AssessmentHandlers) -> Router {
    Router::new()
        .route("/assessment", post(submit_assessment))
        .route("/assessment/questionnaire", get(get_questionnaire))
        .route("/assessment/responses", get(list_responses))
        .route("/profile", get(get_profile))
        .with_state(handlers)
}
