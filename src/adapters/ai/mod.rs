//! AI Provider Adapters.
//!
//! - `OpenAIProvider` - any OpenAI-compatible chat completions endpoint,
//!   defaulting to the hosted inference gateway
//! - `MockAIProvider` - scripted replies for tests

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
