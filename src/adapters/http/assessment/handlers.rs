//! HTTP handlers for assessment and profile endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    GetLearningProfileHandler, GetLearningProfileQuery, ListAssessmentResponsesHandler,
    ListAssessmentResponsesQuery, RunAssessmentCommand, RunAssessmentHandler,
};
use crate::domain::assessment::{AssessmentError, CollectorError, Questionnaire, ResponseCollector};
use crate::domain::foundation::{CommandMetadata, DomainError};

use super::dto::{
    AssessmentHistoryResponse, QuestionnaireView, SubmitAssessmentRequest, SubmitAssessmentResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssessmentHandlers {
    run_handler: Arc<RunAssessmentHandler>,
    profile_handler: Arc<GetLearningProfileHandler>,
    history_handler: Arc<ListAssessmentResponsesHandler>,
    questionnaire: Arc<Questionnaire>,
    default_assessment_type: Arc<str>,
}

impl AssessmentHandlers {
    pub fn new(
        run_handler: Arc<RunAssessmentHandler>,
        profile_handler: Arc<GetLearningProfileHandler>,
        history_handler: Arc<ListAssessmentResponsesHandler>,
        questionnaire: Questionnaire,
        default_assessment_type: impl Into<String>,
    ) -> Self {
        Self {
            run_handler,
            profile_handler,
            history_handler,
            questionnaire: Arc::new(questionnaire),
            default_assessment_type: Arc::from(default_assessment_type.into()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/assessment/questionnaire - The instrument to answer
pub async fn get_questionnaire(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    let view = QuestionnaireView::new(handlers.default_assessment_type.as_ref(), &handlers.questionnaire);
    (StatusCode::OK, Json(view)).into_response()
}

/// POST /api/assessment - Analyse a completed questionnaire
pub async fn submit_assessment(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Response {
    let assessment_type = match req.assessment_type {
        Some(t) if t.trim().is_empty() => {
            return ErrorResponse::bad_request("assessment_type cannot be blank")
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        Some(t) => t,
        None => handlers.default_assessment_type.to_string(),
    };

    let responses = match ResponseCollector::replay(handlers.questionnaire.as_ref().clone(), req.answers) {
        Ok(responses) => responses,
        Err(e) => return handle_collector_error(e),
    };

    let cmd = RunAssessmentCommand {
        responses,
        assessment_type,
    };
    let metadata = CommandMetadata::new(user.id).with_source("http");

    match handlers.run_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = SubmitAssessmentResponse {
                success: true,
                analysis: result.analysis,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessment/responses - Raw submission history, newest first
pub async fn list_responses(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListAssessmentResponsesQuery { user_id: user.id };

    match handlers.history_handler.handle(query).await {
        Ok(records) => {
            let response = AssessmentHistoryResponse {
                responses: records.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// GET /api/profile - The learner's stored profile
pub async fn get_profile(
    State(handlers): State<AssessmentHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetLearningProfileQuery { user_id: user.id };

    match handlers.profile_handler.handle(query).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => ErrorResponse::not_found("No learning profile for this user")
            .into_response_with(StatusCode::NOT_FOUND),
        Err(e) => handle_store_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_collector_error(error: CollectorError) -> Response {
    ErrorResponse::new("INVALID_ANSWERS", error.to_string()).into_response_with(StatusCode::BAD_REQUEST)
}

fn handle_assessment_error(error: AssessmentError) -> Response {
    let status = match &error {
        AssessmentError::RawPersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AssessmentError::InferenceTransportFailure(_)
        | AssessmentError::InferenceParseFailure(_)
        | AssessmentError::InferenceValidationFailure(_) => StatusCode::BAD_GATEWAY,
        AssessmentError::ProfilePersistenceFailure { conflict: true, .. } => StatusCode::CONFLICT,
        AssessmentError::ProfilePersistenceFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    ErrorResponse::new(error.kind().to_uppercase(), error.to_string()).into_response_with(status)
}

fn handle_store_error(error: DomainError) -> Response {
    tracing::error!(code = %error.code, "Store query failed: {}", error.message);
    ErrorResponse::new(error.code.to_string(), error.message).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
