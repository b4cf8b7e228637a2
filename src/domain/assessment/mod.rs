//! Assessment domain.
//!
//! Everything between a learner's first answer and a validated
//! `LearningProfileAnalysis`:
//!
//! - `questionnaire` - the instrument being answered
//! - `collector` - forward-only answer collection
//! - `response` - collected answers and their persisted record
//! - `analysis` - the inference result and its validation
//! - `payload` - model output cleanup shared with other inference consumers
//! - `prompt` - the profile inference prompt

mod analysis;
mod collector;
mod errors;
pub mod payload;
mod prompt;
mod questionnaire;
mod response;

#[cfg(test)]
pub(crate) use analysis::fixtures;

pub use analysis::{
    BreakFrequency, CognitiveScores, ColorScheme, ContentChunking, FontPreference,
    LearningProfileAnalysis, ProfileType, ReadingSpeed, Recommendations,
};
pub use collector::{CollectorStep, ResponseCollector};
pub use errors::{AnalysisError, AssessmentError, CollectorError};
pub use prompt::{assessment_user_prompt, ASSESSMENT_SYSTEM_PROMPT};
pub use questionnaire::{Question, Questionnaire, INITIAL_SCREENING};
pub use response::{AssessmentResponseRecord, QuestionAnswer, QuestionnaireResponse};
