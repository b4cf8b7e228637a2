//! AskAssistantHandler - free-text learning assistant.
//!
//! The learner's profile shapes the prompt when one exists; unassessed
//! learners still get an answer.

use std::sync::Arc;

use crate::application::RetryPolicy;
use crate::domain::foundation::CommandMetadata;
use crate::domain::learning::{prompts, LearningServiceError, StoredLearningProfile};
use crate::ports::{AIProvider, CompletionRequest, LearningProfileRepository, MessageRole, RequestMetadata};

#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
    pub message: String,
    pub context: Option<String>,
}

pub struct AskAssistantHandler {
    profiles: Arc<dyn LearningProfileRepository>,
    ai_provider: Arc<dyn AIProvider>,
    retry: RetryPolicy,
}

impl AskAssistantHandler {
    pub fn new(profiles: Arc<dyn LearningProfileRepository>, ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            profiles,
            ai_provider,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn handle(
        &self,
        cmd: AskAssistantCommand,
        metadata: CommandMetadata,
    ) -> Result<String, LearningServiceError> {
        if cmd.message.trim().is_empty() {
            return Err(LearningServiceError::InvalidRequest("message cannot be empty".into()));
        }

        let profile = self.load_profile(&metadata).await;

        let request = CompletionRequest::new(RequestMetadata::from_command(&metadata, "assistant"))
            .with_system_prompt(prompts::assistant_system_prompt(profile.as_ref()))
            .with_message(
                MessageRole::User,
                prompts::assistant_user_prompt(&cmd.message, cmd.context.as_deref()),
            );

        let response = self
            .retry
            .complete(self.ai_provider.as_ref(), request)
            .await
            .map_err(|e| {
                let err = LearningServiceError::InferenceTransportFailure(e.to_string());
                tracing::error!(user_id = %metadata.user_id, kind = err.kind(), error = %e, "Assistant call failed");
                err
            })?;

        Ok(response.content)
    }

    /// A failed lookup degrades to the unassessed prompt.
    async fn load_profile(&self, metadata: &CommandMetadata) -> Option<StoredLearningProfile> {
        match self.profiles.find_by_user(&metadata.user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(user_id = %metadata.user_id, error = %e, "Profile lookup failed, answering without profile");
                None
            }
        }
    }
}
