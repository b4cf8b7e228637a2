//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - the profile inference service
//! - `AssessmentResponseRepository` - raw questionnaire submissions
//! - `LearningProfileRepository` - derived learning profiles
//! - `SessionValidator` - bearer token validation

mod ai_provider;
mod assessment_response_repository;
mod learning_profile_repository;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message, MessageRole,
    RequestMetadata, ResponseFormat, TokenUsage,
};
pub use assessment_response_repository::AssessmentResponseRepository;
pub use learning_profile_repository::LearningProfileRepository;
pub use session_validator::SessionValidator;
