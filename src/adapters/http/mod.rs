//! HTTP adapters - REST API implementations.
//!
//! - `assessment` - questionnaire, submission, history, and profile
//! - `learning` - content adaptation and the assistant
//! - `middleware` - bearer token authentication

pub mod assessment;
mod error;
pub mod learning;
pub mod middleware;
mod router;

pub use assessment::AssessmentHandlers;
pub use error::ErrorResponse;
pub use learning::LearningHandlers;
pub use router::{app_router, RouterConfig};
