//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, request context, and the error vocabulary
//! used across the NeuroLearn domain.

mod auth;
mod command;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AssessmentResponseId, LearningProfileId, UserId};
pub use timestamp::Timestamp;
