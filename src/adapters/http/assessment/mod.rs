//! HTTP adapter for assessment and profile endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AssessmentHistoryResponse, AssessmentResponseView, QuestionnaireView, SubmitAssessmentRequest,
    SubmitAssessmentResponse,
};
pub use handlers::AssessmentHandlers;
pub use routes::assessment_routes;
