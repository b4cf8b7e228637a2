//! Learning profile analysis produced by profile inference.
//!
//! The analysis is only ever built through `LearningProfileAnalysis::from_value`
//! or `parse`, so every instance in the system has passed validation.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::errors::AnalysisError;
use super::payload::{as_object, one_of, parse_payload, percent, required, text, text_list};
use crate::domain::foundation::ValidationError;

/// Neurodiversity classification of a learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    Adhd,
    Dyslexia,
    Autism,
    Mixed,
    Neurotypical,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Adhd => "adhd",
            ProfileType::Dyslexia => "dyslexia",
            ProfileType::Autism => "autism",
            ProfileType::Mixed => "mixed",
            ProfileType::Neurotypical => "neurotypical",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adhd" => Ok(ProfileType::Adhd),
            "dyslexia" => Ok(ProfileType::Dyslexia),
            "autism" => Ok(ProfileType::Autism),
            "mixed" => Ok(ProfileType::Mixed),
            "neurotypical" => Ok(ProfileType::Neurotypical),
            other => Err(ValidationError::invalid_format(
                "profileType",
                format!("unknown profile type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSpeed {
    Slow,
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontPreference {
    Dyslexic,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    HighContrast,
    Standard,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakFrequency {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentChunking {
    Small,
    Medium,
    Large,
}

macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// The name this value has on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }
    };
}

wire_names!(ReadingSpeed { Slow => "slow", Medium => "medium", Fast => "fast" });
wire_names!(FontPreference { Dyslexic => "dyslexic", Standard => "standard" });
wire_names!(ColorScheme { HighContrast => "high_contrast", Standard => "standard", Dark => "dark" });
wire_names!(BreakFrequency { High => "high", Medium => "medium", Low => "low" });
wire_names!(ContentChunking { Small => "small", Medium => "medium", Large => "large" });

/// Writes whole numbers without a fractional part, so `35` read from the
/// model is written back as `35` and not `35.0`.
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Cognitive dimension scores, each 0 to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveScores {
    #[serde(serialize_with = "whole_as_integer")]
    pub attention: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub processing_speed: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub working_memory: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub reading_fluency: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub executive_function: f64,
}

impl CognitiveScores {
    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        const PATH: &str = "scores";
        let obj = as_object(value, PATH)?;
        Ok(Self {
            attention: percent(obj, PATH, "attention")?,
            processing_speed: percent(obj, PATH, "processing_speed")?,
            working_memory: percent(obj, PATH, "working_memory")?,
            reading_fluency: percent(obj, PATH, "reading_fluency")?,
            executive_function: percent(obj, PATH, "executive_function")?,
        })
    }
}

/// Presentation preferences derived from the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub reading_speed: ReadingSpeed,
    pub font_preference: FontPreference,
    pub color_scheme: ColorScheme,
    pub break_frequency: BreakFrequency,
    pub content_chunking: ContentChunking,
}

impl Recommendations {
    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        const PATH: &str = "recommendations";
        let obj = as_object(value, PATH)?;
        Ok(Self {
            reading_speed: one_of(obj, PATH, "reading_speed")?,
            font_preference: one_of(obj, PATH, "font_preference")?,
            color_scheme: one_of(obj, PATH, "color_scheme")?,
            break_frequency: one_of(obj, PATH, "break_frequency")?,
            content_chunking: one_of(obj, PATH, "content_chunking")?,
        })
    }
}

/// A validated learning profile analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProfileAnalysis {
    #[serde(rename = "profileType")]
    pub profile_type: ProfileType,
    #[serde(serialize_with = "whole_as_integer")]
    pub confidence: f64,
    pub scores: CognitiveScores,
    pub recommendations: Recommendations,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub summary: String,
}

impl LearningProfileAnalysis {
    /// Cleans, parses, and validates raw model output.
    pub fn parse(raw: &str) -> Result<Self, AnalysisError> {
        let value = parse_payload(raw)?;
        Ok(Self::from_value(&value)?)
    }

    /// Validates an already-parsed payload. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(value, "analysis")?;
        Ok(Self {
            profile_type: one_of(obj, "", "profileType")?,
            confidence: percent(obj, "", "confidence")?,
            scores: CognitiveScores::from_value(required(obj, "", "scores")?)?,
            recommendations: Recommendations::from_value(required(obj, "", "recommendations")?)?,
            strengths: text_list(obj, "", "strengths")?,
            challenges: text_list(obj, "", "challenges")?,
            summary: text(obj, "", "summary")?,
        })
    }
}
