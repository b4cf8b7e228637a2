//! Assessment pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assessment::INITIAL_SCREENING;
use crate::domain::learning::ProfileWriteMode;

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// `replace` or `reject_existing`
    #[serde(default)]
    pub profile_write_mode: ProfileWriteMode,

    /// Used when a submission does not name its type
    #[serde(default = "default_assessment_type")]
    pub assessment_type: String,
}

impl AssessmentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.assessment_type.trim().is_empty() {
            return Err(ValidationError::EmptyAssessmentType);
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            profile_write_mode: ProfileWriteMode::default(),
            assessment_type: default_assessment_type(),
        }
    }
}

fn default_assessment_type() -> String {
    INITIAL_SCREENING.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssessmentConfig::default();
        assert_eq!(config.profile_write_mode, ProfileWriteMode::Replace);
        assert_eq!(config.assessment_type, "initial_screening");
    }

    #[test]
    fn test_blank_type_rejected() {
        let config = AssessmentConfig {
            assessment_type: " ".into(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyAssessmentType));
    }
}
