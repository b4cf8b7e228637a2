//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (`RunAssessmentCommand`, `AdaptContentCommand`,
//! `AskAssistantCommand`) are kept apart from queries.

pub mod handlers;
mod retry;

pub use handlers::{
    AdaptContentCommand, AdaptContentHandler, AskAssistantCommand, AskAssistantHandler,
    GetLearningProfileHandler, GetLearningProfileQuery, ListAssessmentResponsesHandler,
    ListAssessmentResponsesQuery, RunAssessmentCommand, RunAssessmentHandler, RunAssessmentResult,
};
pub use retry::RetryPolicy;
