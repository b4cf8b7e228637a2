//! RunAssessmentHandler - the assessment-to-profile pipeline.
//!
//! Stages, each with its own failure kind:
//!
//! 1. store the raw responses (`RawPersistenceFailure`, nothing else runs)
//! 2. call the inference service (`InferenceTransportFailure`)
//! 3. strip fences and parse JSON (`InferenceParseFailure`)
//! 4. validate the analysis (`InferenceValidationFailure`)
//! 5. store the learning profile (`ProfilePersistenceFailure`)
//!
//! The raw row from stage 1 is never rolled back.

use std::sync::Arc;

use crate::application::RetryPolicy;
use crate::domain::assessment::{
    assessment_user_prompt, AnalysisError, AssessmentError, AssessmentResponseRecord,
    LearningProfileAnalysis, QuestionnaireResponse, ASSESSMENT_SYSTEM_PROMPT,
};
use crate::domain::foundation::{CommandMetadata, ErrorCode};
use crate::domain::learning::{ProfileWriteMode, StoredLearningProfile};
use crate::ports::{
    AIProvider, AssessmentResponseRepository, CompletionRequest, LearningProfileRepository,
    MessageRole, RequestMetadata,
};

/// Command to analyse a completed questionnaire.
#[derive(Debug, Clone)]
pub struct RunAssessmentCommand {
    pub responses: QuestionnaireResponse,
    pub assessment_type: String,
}

/// Result of a successful assessment.
#[derive(Debug, Clone)]
pub struct RunAssessmentResult {
    pub analysis: LearningProfileAnalysis,
    pub profile: StoredLearningProfile,
    pub response_record: AssessmentResponseRecord,
}

/// Handler for the assessment pipeline.
pub struct RunAssessmentHandler {
    responses: Arc<dyn AssessmentResponseRepository>,
    profiles: Arc<dyn LearningProfileRepository>,
    ai_provider: Arc<dyn AIProvider>,
    retry: RetryPolicy,
    write_mode: ProfileWriteMode,
}

impl RunAssessmentHandler {
    pub fn new(
        responses: Arc<dyn AssessmentResponseRepository>,
        profiles: Arc<dyn LearningProfileRepository>,
        ai_provider: Arc<dyn AIProvider>,
    ) -> Self {
        Self {
            responses,
            profiles,
            ai_provider,
            retry: RetryPolicy::default(),
            write_mode: ProfileWriteMode::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_write_mode(mut self, write_mode: ProfileWriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub async fn handle(
        &self,
        cmd: RunAssessmentCommand,
        metadata: CommandMetadata,
    ) -> Result<RunAssessmentResult, AssessmentError> {
        let user_id = metadata.user_id.clone();
        let correlation_id = metadata.correlation_id();

        let result = self.run(cmd, &metadata).await;

        match &result {
            Ok(done) => tracing::info!(
                user_id = %user_id,
                correlation_id = %correlation_id,
                profile_type = %done.analysis.profile_type,
                confidence = done.analysis.confidence,
                "Assessment completed"
            ),
            Err(err) => tracing::error!(
                user_id = %user_id,
                correlation_id = %correlation_id,
                kind = err.kind(),
                error = %err,
                "Assessment failed"
            ),
        }

        result
    }

    async fn run(
        &self,
        cmd: RunAssessmentCommand,
        metadata: &CommandMetadata,
    ) -> Result<RunAssessmentResult, AssessmentError> {
        // 1. Persist raw responses
        let record = AssessmentResponseRecord::new(
            metadata.user_id.clone(),
            cmd.assessment_type.clone(),
            cmd.responses,
        );
        self.responses
            .save(&record)
            .await
            .map_err(|e| AssessmentError::RawPersistenceFailure(e.to_string()))?;

        // 2. Call inference
        let request = CompletionRequest::new(RequestMetadata::from_command(metadata, "assessment"))
            .with_system_prompt(ASSESSMENT_SYSTEM_PROMPT)
            .with_message(
                MessageRole::User,
                assessment_user_prompt(&cmd.assessment_type, &record.responses),
            )
            .json_object();

        let response = self
            .retry
            .complete(self.ai_provider.as_ref(), request)
            .await
            .map_err(|e| AssessmentError::InferenceTransportFailure(e.to_string()))?;

        // 3-4. Parse and validate
        let analysis = LearningProfileAnalysis::parse(&response.content).map_err(|e| {
            let stage = match e {
                AnalysisError::Parse(_) => "parse",
                AnalysisError::Invalid(_) => "validation",
            };
            tracing::warn!(
                user_id = %metadata.user_id,
                stage,
                raw_payload = %response.content,
                "Rejected inference payload"
            );
            AssessmentError::from(e)
        })?;

        // 5. Persist profile
        let profile = self.store_profile(metadata, analysis.clone()).await?;

        Ok(RunAssessmentResult {
            analysis,
            profile,
            response_record: record,
        })
    }

    async fn store_profile(
        &self,
        metadata: &CommandMetadata,
        analysis: LearningProfileAnalysis,
    ) -> Result<StoredLearningProfile, AssessmentError> {
        let profile = StoredLearningProfile::from_analysis(metadata.user_id.clone(), analysis);

        match self.write_mode {
            ProfileWriteMode::Replace => self
                .profiles
                .upsert(&profile)
                .await
                .map_err(|e| AssessmentError::profile_persistence(e.to_string())),
            ProfileWriteMode::RejectExisting => match self.profiles.insert(&profile).await {
                Ok(()) => Ok(profile),
                Err(e) if e.code == ErrorCode::ProfileAlreadyExists => {
                    Err(AssessmentError::profile_conflict(e.message))
                }
                Err(e) => Err(AssessmentError::profile_persistence(e.to_string())),
            },
        }
    }
}
