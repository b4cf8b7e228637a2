//! Retry policy for inference calls.
//!
//! Providers make one HTTP attempt per call; whether a failed call is tried
//! again is decided here, per handler. Every completed call is logged with
//! the model and token usage the gateway reported.

use std::time::Duration;

use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason};

/// How many times an inference call is attempted, and how long to wait
/// between attempts.
///
/// Only errors with `AIError::is_retryable()` are retried. The delay doubles
/// after each failed attempt, starting at `backoff`, and never undercuts a
/// gateway's `retry-after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    /// A zero `max_attempts` is treated as one.
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// No retries.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.backoff.saturating_mul(factor)
    }

    fn delay_before_retry(&self, attempt: u32, err: &AIError) -> Duration {
        let backoff = self.delay_after(attempt);
        match err {
            AIError::RateLimited { retry_after_secs } => {
                backoff.max(Duration::from_secs(u64::from(*retry_after_secs)))
            }
            _ => backoff,
        }
    }

    /// Sends `request` to `provider`, retrying retryable failures.
    pub async fn complete(
        &self,
        provider: &dyn AIProvider,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, AIError> {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match provider.complete(request.clone()).await {
                Ok(response) => {
                    log_completion(&request, &response, attempt);
                    return Ok(response);
                }
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = self.delay_before_retry(attempt, &err);
                    tracing::warn!(
                        operation = request.metadata.operation,
                        correlation_id = %request.metadata.correlation_id,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Inference call failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!(
                        operation = request.metadata.operation,
                        attempt,
                        retryable = err.is_retryable(),
                        "Inference call failed, giving up"
                    );
                    return Err(err);
                }
            }
        }
    }
}

fn log_completion(request: &CompletionRequest, response: &CompletionResponse, attempt: u32) {
    if response.finish_reason == FinishReason::Length {
        tracing::warn!(
            operation = request.metadata.operation,
            correlation_id = %request.metadata.correlation_id,
            model = %response.model,
            completion_tokens = response.usage.completion_tokens,
            "Inference reply hit the token limit"
        );
    }

    tracing::info!(
        operation = request.metadata.operation,
        correlation_id = %request.metadata.correlation_id,
        attempt,
        model = %response.model,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        total_tokens = response.usage.total_tokens,
        finish_reason = response.finish_reason.as_str(),
        "Inference call completed"
    );
}
