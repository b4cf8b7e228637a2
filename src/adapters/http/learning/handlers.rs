//! HTTP handlers for content adaptation and the learning assistant.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{AdaptContentCommand, AdaptContentHandler, AskAssistantCommand, AskAssistantHandler};
use crate::domain::foundation::CommandMetadata;
use crate::domain::learning::LearningServiceError;

use super::dto::{AdaptContentRequest, AdaptContentResponse, AssistantRequest, AssistantResponse};

#[derive(Clone)]
pub struct LearningHandlers {
    adapt_handler: Arc<AdaptContentHandler>,
    assistant_handler: Arc<AskAssistantHandler>,
}

impl LearningHandlers {
    pub fn new(adapt_handler: Arc<AdaptContentHandler>, assistant_handler: Arc<AskAssistantHandler>) -> Self {
        Self {
            adapt_handler,
            assistant_handler,
        }
    }
}

/// POST /api/content/adapt - Simplify content or suggest activities
pub async fn adapt_content(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AdaptContentRequest>,
) -> Response {
    let cmd = AdaptContentCommand {
        content: req.content,
        action: req.action,
    };
    let metadata = CommandMetadata::new(user.id).with_source("http");

    match handlers.adapt_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = AdaptContentResponse { success: true, result };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_learning_error(e),
    }
}

/// POST /api/assistant - Ask the learning assistant
pub async fn ask_assistant(
    State(handlers): State<LearningHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AssistantRequest>,
) -> Response {
    let cmd = AskAssistantCommand {
        message: req.message,
        context: req.context,
    };
    let metadata = CommandMetadata::new(user.id).with_source("http");

    match handlers.assistant_handler.handle(cmd, metadata).await {
        Ok(reply) => {
            let response = AssistantResponse { success: true, reply };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_learning_error(e),
    }
}

fn handle_learning_error(error: LearningServiceError) -> Response {
    let status = match &error {
        LearningServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        LearningServiceError::ProfileNotFound => StatusCode::NOT_FOUND,
        LearningServiceError::ProfileLookupFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LearningServiceError::InferenceTransportFailure(_)
        | LearningServiceError::InferenceParseFailure(_)
        | LearningServiceError::InferenceValidationFailure(_) => StatusCode::BAD_GATEWAY,
    };

    ErrorResponse::new(error.kind().to_uppercase(), error.to_string()).into_response_with(status)
}
