//! AI Provider Port - Interface to the profile inference service.
//!
//! Every model call in the system (assessment, content adaptation, the
//! learning assistant) goes through this port as one system turn plus one
//! user turn, and gets back the first choice's text.

use async_trait::async_trait;

use crate::domain::foundation::{CommandMetadata, UserId};

/// Port for chat-completion style inference.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion. The caller waits for the whole reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation turns after the system prompt.
    pub messages: Vec<Message>,
    /// System prompt to guide model behavior.
    pub system_prompt: Option<String>,
    /// Output constraint passed through as `response_format`.
    pub response_format: ResponseFormat,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            response_format: ResponseFormat::Text,
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Constrains the reply to a single JSON object.
    pub fn json_object(mut self) -> Self {
        self.response_format = ResponseFormat::JsonObject;
        self
    }
}

/// Output format constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub user_id: UserId,
    /// Which service issued the call, e.g. "assessment".
    pub operation: &'static str,
    pub correlation_id: String,
}

impl RequestMetadata {
    pub fn new(user_id: UserId, operation: &'static str, correlation_id: impl Into<String>) -> Self {
        Self {
            user_id,
            operation,
            correlation_id: correlation_id.into(),
        }
    }

    /// Derives request metadata from handler metadata.
    pub fn from_command(metadata: &CommandMetadata, operation: &'static str) -> Self {
        Self::new(metadata.user_id.clone(), operation, metadata.correlation_id())
    }
}

/// Response from AI completion.
///
/// Everything but `content` is reporting data; callers log it.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text of the first choice.
    pub content: String,
    pub usage: TokenUsage,
    /// Model that generated the response, as reported by the gateway.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token usage as reported by the provider; zero when not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// The reply hit the token limit and is likely cut off.
    Length,
    ContentFilter,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
        }
    }
}

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// The gateway account has no credits left.
    #[error("inference credits exhausted")]
    CreditsExhausted,

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable (5xx or similar).
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
