//! Questionnaire definitions.
//!
//! A questionnaire is an ordered list of multiple-choice questions. Its length
//! fixes how many answers a `QuestionnaireResponse` must carry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Assessment type recorded for the shipped screening instrument.
pub const INITIAL_SCREENING: &str = "initial_screening";

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            options,
        }
    }

    /// True when `answer` matches one of the options exactly.
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }
}

/// An ordered, non-empty set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    questions: Vec<Question>,
    #[serde(default)]
    allow_free_text: bool,
}

impl Questionnaire {
    /// Builds a questionnaire, rejecting empty question lists and blank prompts.
    ///
    /// A question with no options only makes sense when free text is allowed.
    pub fn new(questions: Vec<Question>, allow_free_text: bool) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }
        for (idx, q) in questions.iter().enumerate() {
            if q.question.trim().is_empty() {
                return Err(ValidationError::empty_field(format!("questions[{}].question", idx)));
            }
            if q.options.is_empty() && !allow_free_text {
                return Err(ValidationError::empty_field(format!("questions[{}].options", idx)));
            }
        }
        Ok(Self {
            questions,
            allow_free_text,
        })
    }

    /// The five-item screening instrument shown to every new learner.
    pub fn initial_screening() -> Self {
        INITIAL_SCREENING_QUESTIONNAIRE.clone()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed questionnaire.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn allows_free_text(&self) -> bool {
        self.allow_free_text
    }
}

fn q(question: &str, options: [&str; 4]) -> Question {
    Question::new(question, options.iter().map(|o| o.to_string()).collect())
}

static INITIAL_SCREENING_QUESTIONNAIRE: Lazy<Questionnaire> = Lazy::new(|| Questionnaire {
    questions: vec![
        q(
            "How do you prefer to learn new concepts?",
            [
                "Visual demonstrations and diagrams",
                "Hands-on practice and experimentation",
                "Reading detailed explanations",
                "Listening to audio explanations",
            ],
        ),
        q(
            "When reading, do you find it helpful to:",
            [
                "Use a ruler or finger to follow lines",
                "Read faster by skimming",
                "Take frequent breaks",
                "Adjust font size or spacing",
            ],
        ),
        q(
            "How long can you typically focus on a task without a break?",
            [
                "Less than 15 minutes",
                "15-30 minutes",
                "30-60 minutes",
                "More than 60 minutes",
            ],
        ),
        q(
            "Which environment helps you concentrate best?",
            [
                "Quiet space with minimal distractions",
                "Background music or white noise",
                "Active environment with some activity",
                "Varied - depends on the task",
            ],
        ),
        q(
            "How do you organize and remember information?",
            [
                "Visual mind maps or diagrams",
                "Lists and written notes",
                "Voice recordings or verbal repetition",
                "Physical movement or gestures",
            ],
        ),
    ],
    allow_free_text: false,
});
