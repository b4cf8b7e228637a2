//! Response collector.
//!
//! Walks a questionnaire one answer at a time. Forward only: there is no
//! going back and nothing is saved until the last answer arrives.

use super::errors::CollectorError;
use super::questionnaire::{Question, Questionnaire};
use super::response::{QuestionAnswer, QuestionnaireResponse};

/// Outcome of an accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorStep {
    /// More answers needed; carries the question to ask next.
    Next(Question),
    /// That was the last answer.
    Complete(QuestionnaireResponse),
}

/// Collects the answers to one questionnaire.
#[derive(Debug, Clone)]
pub struct ResponseCollector {
    questionnaire: Questionnaire,
    answers: Vec<QuestionAnswer>,
    complete: bool,
}

impl ResponseCollector {
    pub fn new(questionnaire: Questionnaire) -> Self {
        let capacity = questionnaire.len();
        Self {
            questionnaire,
            answers: Vec::with_capacity(capacity),
            complete: false,
        }
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.complete {
            return None;
        }
        self.questionnaire.question(self.answers.len())
    }

    /// Zero-based index of the question awaiting an answer.
    pub fn current_index(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Accepts the answer to the current question.
    ///
    /// Rejected answers leave the collector unchanged.
    pub fn submit_answer(&mut self, answer: impl Into<String>) -> Result<CollectorStep, CollectorError> {
        let index = self.answers.len();
        let question = match self.current_question() {
            Some(q) => q,
            None => return Err(CollectorError::AlreadyComplete),
        };

        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(CollectorError::EmptyAnswer { index });
        }
        if !self.questionnaire.allows_free_text() && !question.has_option(&answer) {
            return Err(CollectorError::NotAnOption { index, answer });
        }

        let entry = QuestionAnswer {
            question: question.question.clone(),
            answer,
        };
        self.answers.push(entry);

        match self.questionnaire.question(self.answers.len()) {
            Some(next) => Ok(CollectorStep::Next(next.clone())),
            None => {
                self.complete = true;
                Ok(CollectorStep::Complete(QuestionnaireResponse::from_answers(
                    self.answers.clone(),
                )))
            }
        }
    }

    /// Feeds an already-ordered answer list through a fresh collector.
    ///
    /// Used by stateless callers that submit every answer at once. Too many
    /// answers fail as `AlreadyComplete`, too few as `Incomplete`.
    pub fn replay<I, S>(questionnaire: Questionnaire, answers: I) -> Result<QuestionnaireResponse, CollectorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected = questionnaire.len();
        let mut collector = Self::new(questionnaire);
        let mut completed = None;

        for answer in answers {
            if let CollectorStep::Complete(response) = collector.submit_answer(answer)? {
                completed = Some(response);
            }
        }

        completed.ok_or(CollectorError::Incomplete {
            expected,
            actual: collector.current_index(),
        })
    }
}
