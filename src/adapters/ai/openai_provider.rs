//! OpenAI-compatible Provider - Implementation of AIProvider over
//! `POST {base_url}/chat/completions`.
//!
//! Defaults target the hosted inference gateway. Any endpoint speaking the
//! OpenAI chat-completions protocol works by overriding `base_url` and `model`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("google/gemini-2.5-flash")
//!     .with_base_url("https://ai.gateway.lovable.dev/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! The provider makes exactly one HTTP attempt per call. Retrying is the
//! caller's decision (see `application::RetryPolicy`).

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ResponseFormat, TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Whole-request timeout, connect included.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key and gateway defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL. A trailing slash is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat completions provider.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(prompt.clone()),
            });
        }

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: Some(msg.content.clone()),
            });
        }

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            response_format: match request.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(OpenAIResponseFormat {
                    kind: "json_object",
                }),
            },
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to `AIError`.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            402 => Err(AIError::CreditsExhausted),
            429 => Err(AIError::rate_limited(retry_after.unwrap_or(30))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        };

        let content = match choice.message.content {
            Some(content) => content,
            None if finish_reason == FinishReason::ContentFilter => {
                return Err(AIError::content_filtered("response withheld by provider"))
            }
            None => return Err(AIError::parse("Choice has no message content")),
        };

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage,
            model: openai_response.model.unwrap_or_else(|| self.config.model.clone()),
            finish_reason,
        })
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tracing::debug!(
            operation = request.metadata.operation,
            correlation_id = %request.metadata.correlation_id,
            model = %self.config.model,
            json_object = request.response_format == ResponseFormat::JsonObject,
            "Sending chat completion"
        );

        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAIResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: Option<String>,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
