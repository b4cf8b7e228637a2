//! In-memory repository adapters.
//!
//! Used by tests and by `NEUROLEARN__DATABASE__URL`-less local runs.

mod assessment_response_repository;
mod learning_profile_repository;

pub use assessment_response_repository::InMemoryAssessmentResponseRepository;
pub use learning_profile_repository::InMemoryLearningProfileRepository;
