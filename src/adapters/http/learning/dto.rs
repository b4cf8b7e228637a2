//! HTTP DTOs for content adaptation and the learning assistant.

use serde::{Deserialize, Serialize};

use crate::domain::learning::{AdaptedContent, ContentAction};

/// Body of `POST /api/content/adapt`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptContentRequest {
    pub content: String,
    pub action: ContentAction,
}

/// `result` is a string for `simplify` and an activity list for
/// `suggest_activities`.
#[derive(Debug, Clone, Serialize)]
pub struct AdaptContentResponse {
    pub success: bool,
    pub result: AdaptedContent,
}

/// Body of `POST /api/assistant`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    pub success: bool,
    pub reply: String,
}
