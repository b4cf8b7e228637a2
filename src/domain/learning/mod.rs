//! Learning domain.
//!
//! The stored profile and the profile-conditioned services built on it:
//! content adaptation and the learning assistant.

mod activity;
mod content;
mod profile;
pub mod prompts;

pub use activity::{parse_activities, ActivityType, Difficulty, SuggestedActivity};
pub use content::{AdaptedContent, ContentAction, LearningServiceError};
pub use profile::{ProfileWriteMode, StoredLearningProfile};
