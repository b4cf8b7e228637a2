//! Mock AI Provider for testing.
//!
//! Replays a queue of canned replies or errors and records every request so
//! tests can assert on the prompts that were sent.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_error(MockError::Unavailable { message: "HTTP 500".into() })
//!     .with_response(r#"{"profileType": "adhd", ...}"#);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    model: String,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success { content: String, usage: TokenUsage },
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    CreditsExhausted,
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::CreditsExhausted => AIError::CreditsExhausted,
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Recovers the guard even if a panicking test poisoned the lock.
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            model: "mock-model-1".to_string(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        locked(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        locked(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        locked(&self.calls).clone()
    }

    /// Unscripted calls get a fixed text reply.
    fn next_response(&self) -> MockResponse {
        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
                usage: TokenUsage::new(5, 10),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        locked(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content, usage } => Ok(CompletionResponse {
                content,
                usage,
                model: self.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{MessageRole, RequestMetadata};

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(
            UserId::new("learner-1").unwrap(),
            "test",
            "corr",
        ))
        .with_message(MessageRole::User, text)
    }

    #[tokio::test]
    async fn replays_queue_in_order() {
        let provider = MockAIProvider::new()
            .with_error(MockError::Unavailable {
                message: "HTTP 500".into(),
            })
            .with_response("second");

        let first = provider.complete(request("a")).await;
        let second = provider.complete(request("b")).await.unwrap();

        assert_eq!(first.unwrap_err(), AIError::unavailable("HTTP 500"));
        assert_eq!(second.content, "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_reply() {
        let provider = MockAIProvider::new();
        let response = provider.complete(request("hi")).await.unwrap();

        assert_eq!(response.content, "Mock response");
        assert_eq!(response.model, "mock-model-1");
    }

    #[tokio::test]
    async fn records_calls_across_clones() {
        let provider = MockAIProvider::new();
        let handle = provider.clone();

        provider.complete(request("one")).await.unwrap();
        provider.complete(request("two")).await.unwrap();

        assert_eq!(handle.call_count(), 2);
        assert_eq!(handle.get_calls()[1].messages[0].content, "two");
    }

    #[test]
    fn mock_errors_convert() {
        assert_eq!(AIError::from(MockError::CreditsExhausted), AIError::CreditsExhausted);
        assert!(AIError::from(MockError::Network { message: "reset".into() }).is_retryable());
    }
}
