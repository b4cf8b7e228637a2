//! Learning handlers - services conditioned on a stored profile.

mod adapt_content;
mod ask_assistant;

pub use adapt_content::{AdaptContentCommand, AdaptContentHandler};
pub use ask_assistant::{AskAssistantCommand, AskAssistantHandler};
