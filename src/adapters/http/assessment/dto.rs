//! HTTP DTOs for assessment and profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    AssessmentResponseRecord, LearningProfileAnalysis, Question, QuestionAnswer, Questionnaire,
};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/assessment`: answers in question order.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub answers: Vec<String>,
    #[serde(default)]
    pub assessment_type: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub assessment_type: String,
    pub questions: Vec<Question>,
    pub allow_free_text: bool,
}

impl QuestionnaireView {
    pub fn new(assessment_type: impl Into<String>, questionnaire: &Questionnaire) -> Self {
        Self {
            assessment_type: assessment_type.into(),
            questions: questionnaire.questions().to_vec(),
            allow_free_text: questionnaire.allows_free_text(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAssessmentResponse {
    pub success: bool,
    pub analysis: LearningProfileAnalysis,
}

/// One raw submission. `responses` keeps the stored `{questions: [...]}` shape.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponseView {
    pub id: String,
    pub assessment_type: String,
    pub responses: ResponsesView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<serde_json::Value>,
    pub completed_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponsesView {
    pub questions: Vec<QuestionAnswer>,
}

impl From<AssessmentResponseRecord> for AssessmentResponseView {
    fn from(record: AssessmentResponseRecord) -> Self {
        Self {
            id: record.id.to_string(),
            assessment_type: record.assessment_type,
            responses: ResponsesView {
                questions: record.responses.answers().to_vec(),
            },
            score: record.score,
            completed_at: record.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentHistoryResponse {
    pub responses: Vec<AssessmentResponseView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_type_is_optional() {
        let req: SubmitAssessmentRequest = serde_json::from_str(r#"{"answers": ["a", "b"]}"#).unwrap();
        assert_eq!(req.answers, vec!["a", "b"]);
        assert!(req.assessment_type.is_none());
    }

    #[test]
    fn questionnaire_view_lists_options() {
        let view = QuestionnaireView::new("initial_screening", &Questionnaire::initial_screening());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["assessment_type"], "initial_screening");
        assert_eq!(json["questions"].as_array().unwrap().len(), 5);
        assert_eq!(json["questions"][0]["options"].as_array().unwrap().len(), 4);
        assert_eq!(json["allow_free_text"], false);
    }
}
