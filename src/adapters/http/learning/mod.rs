//! HTTP adapter for the profile-conditioned learning services.

mod dto;
mod handlers;
mod routes;

pub use dto::{AdaptContentRequest, AdaptContentResponse, AssistantRequest, AssistantResponse};
pub use handlers::LearningHandlers;
pub use routes::learning_routes;
