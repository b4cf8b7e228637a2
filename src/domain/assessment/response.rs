//! Collected answers and their persisted record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssessmentResponseId, Timestamp, UserId};

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// The ordered answers to a whole questionnaire.
///
/// Serializes as `{"questions": [{"question", "answer"}, ...]}`, which is the
/// shape stored in the `responses` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    questions: Vec<QuestionAnswer>,
}

impl QuestionnaireResponse {
    /// Only the collector produces a response from live answers.
    pub(crate) fn from_answers(questions: Vec<QuestionAnswer>) -> Self {
        Self { questions }
    }

    pub fn answers(&self) -> &[QuestionAnswer] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A raw questionnaire submission as persisted, before any inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponseRecord {
    pub id: AssessmentResponseId,
    pub user_id: UserId,
    pub assessment_type: String,
    pub responses: QuestionnaireResponse,
    /// Never filled by the pipeline; kept for rows scored elsewhere.
    pub score: Option<serde_json::Value>,
    pub completed_at: Timestamp,
}

impl AssessmentResponseRecord {
    /// Creates a record for a submission completed now.
    pub fn new(
        user_id: UserId,
        assessment_type: impl Into<String>,
        responses: QuestionnaireResponse,
    ) -> Self {
        Self {
            id: AssessmentResponseId::new(),
            user_id,
            assessment_type: assessment_type.into(),
            responses,
            score: None,
            completed_at: Timestamp::now(),
        }
    }
}
