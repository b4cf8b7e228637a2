//! Error types for the assessment domain.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors raised while collecting answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectorError {
    #[error("Answer to question {index} cannot be empty")]
    EmptyAnswer { index: usize },

    #[error("'{answer}' is not an option for question {index}")]
    NotAnOption { index: usize, answer: String },

    #[error("Questionnaire already complete")]
    AlreadyComplete,

    #[error("Expected {expected} answers, got {actual}")]
    Incomplete { expected: usize, actual: usize },
}

/// Errors raised at the inference parse boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The cleaned payload is not JSON at all.
    #[error("Inference payload is not valid JSON: {0}")]
    Parse(String),

    /// The payload is JSON but breaks the analysis contract.
    #[error("Inference payload failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

/// Failure kinds of the assessment pipeline.
///
/// Each variant maps to exactly one pipeline stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("Failed to store assessment responses: {0}")]
    RawPersistenceFailure(String),

    #[error("Profile inference call failed: {0}")]
    InferenceTransportFailure(String),

    #[error("Profile inference returned unparseable output: {0}")]
    InferenceParseFailure(String),

    #[error("Profile inference returned an invalid analysis: {0}")]
    InferenceValidationFailure(String),

    #[error("Failed to store learning profile: {message}")]
    ProfilePersistenceFailure { message: String, conflict: bool },
}

impl AssessmentError {
    /// Stable snake_case name used in logs and error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            AssessmentError::RawPersistenceFailure(_) => "raw_persistence_failure",
            AssessmentError::InferenceTransportFailure(_) => "inference_transport_failure",
            AssessmentError::InferenceParseFailure(_) => "inference_parse_failure",
            AssessmentError::InferenceValidationFailure(_) => "inference_validation_failure",
            AssessmentError::ProfilePersistenceFailure { .. } => "profile_persistence_failure",
        }
    }

    pub fn profile_persistence(message: impl Into<String>) -> Self {
        AssessmentError::ProfilePersistenceFailure {
            message: message.into(),
            conflict: false,
        }
    }

    pub fn profile_conflict(message: impl Into<String>) -> Self {
        AssessmentError::ProfilePersistenceFailure {
            message: message.into(),
            conflict: true,
        }
    }
}

impl From<AnalysisError> for AssessmentError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Parse(msg) => AssessmentError::InferenceParseFailure(msg),
            AnalysisError::Invalid(v) => AssessmentError::InferenceValidationFailure(v.to_string()),
        }
    }
}
