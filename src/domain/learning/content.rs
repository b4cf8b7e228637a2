//! Content adaptation requests and results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::activity::SuggestedActivity;
use crate::domain::assessment::AnalysisError;

/// What to do with a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentAction {
    Simplify,
    SuggestActivities,
}

impl ContentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentAction::Simplify => "simplify",
            ContentAction::SuggestActivities => "suggest_activities",
        }
    }
}

/// Result of an adaptation; serialized untagged as the `result` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdaptedContent {
    Simplified(String),
    Activities(Vec<SuggestedActivity>),
}

/// Errors from the profile-conditioned learning services.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LearningServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No learning profile found for this user")]
    ProfileNotFound,

    #[error("Failed to load learning profile: {0}")]
    ProfileLookupFailure(String),

    #[error("Inference call failed: {0}")]
    InferenceTransportFailure(String),

    #[error("Inference returned unusable output: {0}")]
    InferenceParseFailure(String),

    #[error("Inference output failed validation: {0}")]
    InferenceValidationFailure(String),
}

impl LearningServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            LearningServiceError::InvalidRequest(_) => "invalid_request",
            LearningServiceError::ProfileNotFound => "profile_not_found",
            LearningServiceError::ProfileLookupFailure(_) => "profile_lookup_failure",
            LearningServiceError::InferenceTransportFailure(_) => "inference_transport_failure",
            LearningServiceError::InferenceParseFailure(_) => "inference_parse_failure",
            LearningServiceError::InferenceValidationFailure(_) => "inference_validation_failure",
        }
    }
}

impl From<AnalysisError> for LearningServiceError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Parse(msg) => LearningServiceError::InferenceParseFailure(msg),
            AnalysisError::Invalid(v) => LearningServiceError::InferenceValidationFailure(v.to_string()),
        }
    }
}
