//! Command and query handlers.
//!
//! Handlers take explicit `CommandMetadata` for the acting learner; none of
//! them read ambient session state.

pub mod assessment;
pub mod learning;

pub use assessment::{
    GetLearningProfileHandler, GetLearningProfileQuery, ListAssessmentResponsesHandler,
    ListAssessmentResponsesQuery, RunAssessmentCommand, RunAssessmentHandler, RunAssessmentResult,
};
pub use learning::{AdaptContentCommand, AdaptContentHandler, AskAssistantCommand, AskAssistantHandler};
