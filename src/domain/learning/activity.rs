//! Suggested learning activities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::assessment::payload::{as_object, one_of, parse_payload, text};
use crate::domain::assessment::AnalysisError;
use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Interactive,
    Reflection,
    Creative,
    Practice,
}

/// One activity proposed for a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedActivity {
    pub title: String,
    pub description: String,
    /// Free-form estimate, e.g. "15 minutes".
    pub duration: String,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
}

impl SuggestedActivity {
    fn from_value(value: &Value, index: usize) -> Result<Self, ValidationError> {
        let path = format!("activities[{}]", index);
        let obj = as_object(value, &path)?;
        Ok(Self {
            title: text(obj, &path, "title")?,
            description: text(obj, &path, "description")?,
            duration: duration(obj.get("duration"), &path)?,
            difficulty: one_of(obj, &path, "difficulty")?,
            activity_type: one_of(obj, &path, "type")?,
        })
    }
}

/// Models return the duration as a string or a bare number of minutes.
fn duration(value: Option<&Value>, path: &str) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(format!("{} minutes", n)),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(ValidationError::empty_field(format!("{}.duration", path)))
        }
        Some(_) => Err(ValidationError::invalid_format(
            format!("{}.duration", path),
            "expected a string or number",
        )),
    }
}

/// Cleans, parses, and validates a suggested-activities reply.
///
/// Accepts a bare array or an object wrapping the array under `activities`
/// (JSON-object response mode cannot return an array root).
pub fn parse_activities(raw: &str) -> Result<Vec<SuggestedActivity>, AnalysisError> {
    let value = parse_payload(raw)?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("activities") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ValidationError::invalid_format(
                    "activities",
                    "expected an array of activities",
                )
                .into())
            }
        },
        _ => {
            return Err(
                ValidationError::invalid_format("activities", "expected an array of activities").into(),
            )
        }
    };

    if items.is_empty() {
        return Err(ValidationError::empty_field("activities").into());
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| SuggestedActivity::from_value(item, i).map_err(AnalysisError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity_json() -> Value {
        json!({
            "title": "Fraction pizza",
            "description": "Cut paper pizzas into equal slices",
            "duration": "15 minutes",
            "difficulty": "easy",
            "type": "interactive"
        })
    }

    #[test]
    fn parses_bare_array() {
        let raw = json!([activity_json()]).to_string();
        let activities = parse_activities(&raw).unwrap();

        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].difficulty, Difficulty::Easy);
        assert_eq!(activities[0].activity_type, ActivityType::Interactive);
    }

    #[test]
    fn parses_wrapped_array_inside_fence() {
        let raw = format!("```json\n{}\n```", json!({"activities": [activity_json(), activity_json()]}));
        assert_eq!(parse_activities(&raw).unwrap().len(), 2);
    }

    #[test]
    fn numeric_duration_becomes_minutes() {
        let mut item = activity_json();
        item["duration"] = 20.into();

        let activities = parse_activities(&json!([item]).to_string()).unwrap();
        assert_eq!(activities[0].duration, "20 minutes");
    }

    #[test]
    fn out_of_set_difficulty_is_invalid() {
        let mut item = activity_json();
        item["difficulty"] = "extreme".into();

        let err = parse_activities(&json!([item]).to_string()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Invalid(ValidationError::InvalidFormat { ref field, .. }) if field == "activities[0].difficulty"
        ));
    }

    #[test]
    fn object_without_activities_is_invalid() {
        let err = parse_activities(&json!({"ideas": []}).to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::Invalid(_)));
    }

    #[test]
    fn empty_list_is_invalid() {
        let err = parse_activities("[]").unwrap_err();
        assert_eq!(err, AnalysisError::Invalid(ValidationError::empty_field("activities")));
    }

    #[test]
    fn serializes_type_field_name() {
        let activities = parse_activities(&json!([activity_json()]).to_string()).unwrap();
        let json = serde_json::to_value(&activities[0]).unwrap();

        assert_eq!(json["type"], "interactive");
        assert!(json.get("activity_type").is_none());
    }
}
