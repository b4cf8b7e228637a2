//! Prompt templates for profile inference.

use serde_json::Value;

use super::response::{QuestionAnswer, QuestionnaireResponse};

/// Role and output contract for profile inference.
pub const ASSESSMENT_SYSTEM_PROMPT: &str = r#"You are an expert educational psychologist specializing in neurodiverse learning assessments.
Analyze the assessment responses and provide a detailed learning profile.

Return your analysis as a JSON object with this exact structure:
{
  "profileType": "adhd" | "dyslexia" | "autism" | "mixed" | "neurotypical",
  "confidence": 0-100,
  "scores": {
    "attention": 0-100,
    "processing_speed": 0-100,
    "working_memory": 0-100,
    "reading_fluency": 0-100,
    "executive_function": 0-100
  },
  "recommendations": {
    "reading_speed": "slow" | "medium" | "fast",
    "font_preference": "dyslexic" | "standard",
    "color_scheme": "high_contrast" | "standard" | "dark",
    "break_frequency": "high" | "medium" | "low",
    "content_chunking": "small" | "medium" | "large"
  },
  "strengths": ["strength1", "strength2"],
  "challenges": ["challenge1", "challenge2"],
  "summary": "Brief summary of the learning profile"
}"#;

/// Builds the user turn: the assessment type plus the answers as a
/// pretty-printed `[{question, answer}]` array.
pub fn assessment_user_prompt(assessment_type: &str, responses: &QuestionnaireResponse) -> String {
    format!(
        "Assessment Type: {}\nResponses: {}\n\nAnalyze these responses and provide a comprehensive learning profile.",
        assessment_type,
        answers_json(responses.answers())
    )
}

/// Pretty JSON with `question` ahead of `answer`, as the model has always
/// seen it.
fn answers_json(answers: &[QuestionAnswer]) -> String {
    if answers.is_empty() {
        return "[]".to_string();
    }
    let entries: Vec<String> = answers
        .iter()
        .map(|qa| {
            format!(
                "  {{\n    \"question\": {},\n    \"answer\": {}\n  }}",
                Value::from(qa.question.as_str()),
                Value::from(qa.answer.as_str())
            )
        })
        .collect();
    format!("[\n{}\n]", entries.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{Questionnaire, ResponseCollector};

    #[test]
    fn system_prompt_lists_every_profile_type() {
        for name in ["adhd", "dyslexia", "autism", "mixed", "neurotypical"] {
            assert!(ASSESSMENT_SYSTEM_PROMPT.contains(name));
        }
    }

    #[test]
    fn user_prompt_embeds_type_and_answers() {
        let questionnaire = Questionnaire::initial_screening();
        let answers: Vec<String> = questionnaire
            .questions()
            .iter()
            .map(|q| q.options[1].clone())
            .collect();
        let responses = ResponseCollector::replay(questionnaire, answers).unwrap();

        let prompt = assessment_user_prompt("initial_screening", &responses);

        assert!(prompt.starts_with("Assessment Type: initial_screening\nResponses: [\n  {"));
        assert!(prompt.contains("\"answer\": \"Read faster by skimming\""));
        assert!(prompt.ends_with("provide a comprehensive learning profile."));
    }

    #[test]
    fn answers_block_matches_pretty_serializer_output() {
        let answers = vec![QuestionAnswer {
            question: "Say \"hi\"".to_string(),
            answer: "Line one\nline two".to_string(),
        }];

        assert_eq!(answers_json(&answers), serde_json::to_string_pretty(&answers).unwrap());
        assert_eq!(answers_json(&[]), "[]");
    }
}
