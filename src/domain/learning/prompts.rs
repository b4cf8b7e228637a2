//! Prompt templates for the content adaptation and assistant services.

use serde_json::Value;

use super::profile::StoredLearningProfile;
use crate::domain::assessment::Recommendations;

/// Builds the system prompt for simplifying content.
pub fn simplify_system_prompt(profile: &StoredLearningProfile) -> String {
    format!(
        "You are an adaptive learning content optimizer for neurodiverse students.
Simplify the content based on the user's learning profile while maintaining educational value.

Learning Profile: {}
Preferences: {}

Guidelines:
- Use shorter sentences and paragraphs
- Replace complex vocabulary with simpler alternatives
- Add visual structure (bullet points, numbered lists)
- Break content into digestible chunks
- Maintain core concepts and learning objectives",
        profile.profile_type,
        preferences_json(&profile.preferences)
    )
}

/// Compact JSON in field order.
fn preferences_json(p: &Recommendations) -> String {
    format!(
        r#"{{"reading_speed":"{}","font_preference":"{}","color_scheme":"{}","break_frequency":"{}","content_chunking":"{}"}}"#,
        p.reading_speed.as_str(),
        p.font_preference.as_str(),
        p.color_scheme.as_str(),
        p.break_frequency.as_str(),
        p.content_chunking.as_str()
    )
}

pub fn simplify_user_prompt(content: &str) -> String {
    format!("Simplify this content:\n\n{}", content)
}

/// System prompt for activity suggestions.
///
/// JSON-object mode needs an object root, so the array is wrapped.
pub const ACTIVITIES_SYSTEM_PROMPT: &str = r#"You are an educational activity designer for neurodiverse learners.
Create engaging, personalized learning activities based on the content and learning profile.

Return 3-5 activities as a JSON object with this structure:
{
  "activities": [
    {
      "title": "Activity title",
      "description": "What students will do",
      "duration": "estimated time in minutes",
      "difficulty": "easy|medium|hard",
      "type": "interactive|reflection|creative|practice"
    }
  ]
}"#;

pub fn activities_user_prompt(content: &str, profile: &StoredLearningProfile) -> String {
    format!(
        "Content: {}\n\nLearning Profile: {}\nCreate personalized learning activities for this content.",
        content, profile.profile_type
    )
}

/// Builds the assistant system prompt, with or without a profile.
pub fn assistant_system_prompt(profile: Option<&StoredLearningProfile>) -> String {
    let learner = match profile {
        Some(p) => format!(
            "Student Learning Profile: {}\nStrengths: {}\nChallenges: {}",
            p.profile_type,
            Value::from(p.assessment_score.strengths.as_slice()),
            Value::from(p.assessment_score.challenges.as_slice()),
        ),
        None => "Student Learning Profile: Not assessed yet".to_string(),
    };

    format!(
        "You are a supportive AI learning assistant for neurodiverse students.

{}

Your role:
- Provide patient, encouraging support
- Break down complex concepts into simple steps
- Use visual language and examples
- Celebrate progress and effort
- Adapt explanations to the student's learning style
- Suggest breaks when needed
- Make learning fun and engaging

Communication style:
- Use short, clear sentences
- Include emojis for emotional support 😊
- Provide step-by-step guidance
- Ask clarifying questions
- Offer multiple ways to understand concepts",
        learner
    )
}

/// Prefixes the question with caller-supplied context when present.
pub fn assistant_user_prompt(message: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(ctx) => format!("Context: {}\n\nQuestion: {}", ctx, message),
        None => message.to_string(),
    }
}
