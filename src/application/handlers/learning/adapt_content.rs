//! AdaptContentHandler - profile-conditioned content simplification and
//! activity suggestions.

use std::sync::Arc;

use crate::application::RetryPolicy;
use crate::domain::assessment::AnalysisError;
use crate::domain::foundation::CommandMetadata;
use crate::domain::learning::{
    parse_activities, prompts, AdaptedContent, ContentAction, LearningServiceError,
    StoredLearningProfile,
};
use crate::ports::{AIProvider, CompletionRequest, LearningProfileRepository, MessageRole, RequestMetadata};

#[derive(Debug, Clone)]
pub struct AdaptContentCommand {
    pub content: String,
    pub action: ContentAction,
}

pub struct AdaptContentHandler {
    profiles: Arc<dyn LearningProfileRepository>,
    ai_provider: Arc<dyn AIProvider>,
    retry: RetryPolicy,
}

impl AdaptContentHandler {
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
        cmd: AdaptContentCommand,
        metadata: CommandMetadata,
    ) -> Result<AdaptedContent, LearningServiceError> {
        if cmd.content.trim().is_empty() {
            return Err(LearningServiceError::InvalidRequest("content cannot be empty".into()));
        }

        let profile = self
            .profiles
            .find_by_user(&metadata.user_id)
            .await
            .map_err(|e| LearningServiceError::ProfileLookupFailure(e.to_string()))?
            .ok_or(LearningServiceError::ProfileNotFound)?;

        let result = match cmd.action {
            ContentAction::Simplify => self.simplify(&cmd.content, &profile, &metadata).await,
            ContentAction::SuggestActivities => self.suggest_activities(&cmd.content, &profile, &metadata).await,
        };

        if let Err(err) = &result {
            tracing::error!(
                user_id = %metadata.user_id,
                action = cmd.action.as_str(),
                kind = err.kind(),
                error = %err,
                "Content adaptation failed"
            );
        }

        result
    }

    async fn simplify(
        &self,
        content: &str,
        profile: &StoredLearningProfile,
        metadata: &CommandMetadata,
    ) -> Result<AdaptedContent, LearningServiceError> {
        let request = CompletionRequest::new(RequestMetadata::from_command(metadata, "content_simplify"))
            .with_system_prompt(prompts::simplify_system_prompt(profile))
            .with_message(MessageRole::User, prompts::simplify_user_prompt(content));

        let response = self
            .retry
            .complete(self.ai_provider.as_ref(), request)
            .await
            .map_err(|e| LearningServiceError::InferenceTransportFailure(e.to_string()))?;

        Ok(AdaptedContent::Simplified(response.content))
    }

    async fn suggest_activities(
        &self,
        content: &str,
        profile: &StoredLearningProfile,
        metadata: &CommandMetadata,
    ) -> Result<AdaptedContent, LearningServiceError> {
        let request = CompletionRequest::new(RequestMetadata::from_command(metadata, "content_activities"))
            .with_system_prompt(prompts::ACTIVITIES_SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompts::activities_user_prompt(content, profile))
            .json_object();

        let response = self
            .retry
            .complete(self.ai_provider.as_ref(), request)
            .await
            .map_err(|e| LearningServiceError::InferenceTransportFailure(e.to_string()))?;

        let activities = parse_activities(&response.content).map_err(|e| {
            let stage = match e {
                AnalysisError::Parse(_) => "parse",
                AnalysisError::Invalid(_) => "validation",
            };
            tracing::warn!(
                user_id = %metadata.user_id,
                stage,
                raw_payload = %response.content,
                "Rejected activities payload"
            );
            LearningServiceError::from(e)
        })?;

        Ok(AdaptedContent::Activities(activities))
    }
}
