//! Assessment handlers - the profile pipeline and its read side.

mod get_learning_profile;
mod list_responses;
mod run_assessment;

pub use get_learning_profile::{GetLearningProfileHandler, GetLearningProfileQuery};
pub use list_responses::{ListAssessmentResponsesHandler, ListAssessmentResponsesQuery};
pub use run_assessment::{RunAssessmentCommand, RunAssessmentHandler, RunAssessmentResult};
