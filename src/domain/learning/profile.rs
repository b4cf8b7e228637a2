//! Stored learning profile.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{CognitiveScores, LearningProfileAnalysis, ProfileType, Recommendations};
use crate::domain::foundation::{LearningProfileId, Timestamp, UserId};

/// A learner's durable profile, derived from one validated analysis.
///
/// `profile_type`, `preferences` and `cognitive_metrics` are always copies of
/// the matching parts of `assessment_score`; only the constructors below set
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLearningProfile {
    pub id: LearningProfileId,
    pub user_id: UserId,
    pub profile_type: ProfileType,
    pub assessment_score: LearningProfileAnalysis,
    pub preferences: Recommendations,
    pub cognitive_metrics: CognitiveScores,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredLearningProfile {
    /// Creates a fresh profile for `user_id`.
    pub fn from_analysis(user_id: UserId, analysis: LearningProfileAnalysis) -> Self {
        let now = Timestamp::now();
        Self {
            id: LearningProfileId::new(),
            user_id,
            profile_type: analysis.profile_type,
            preferences: analysis.recommendations.clone(),
            cognitive_metrics: analysis.scores.clone(),
            assessment_score: analysis,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a profile from persisted columns.
    ///
    /// Derived columns are recomputed from `assessment_score` so a drifted
    /// row cannot produce an inconsistent profile.
    pub fn reconstitute(
        id: LearningProfileId,
        user_id: UserId,
        assessment_score: LearningProfileAnalysis,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            profile_type: assessment_score.profile_type,
            preferences: assessment_score.recommendations.clone(),
            cognitive_metrics: assessment_score.scores.clone(),
            assessment_score,
            created_at,
            updated_at,
        }
    }

    /// Replaces the analysis, keeping identity and `created_at`.
    pub fn replace_analysis(&mut self, analysis: LearningProfileAnalysis) {
        self.profile_type = analysis.profile_type;
        self.preferences = analysis.recommendations.clone();
        self.cognitive_metrics = analysis.scores.clone();
        self.assessment_score = analysis;
        self.updated_at = Timestamp::now();
    }
}

/// How a new analysis is written when the learner already has a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileWriteMode {
    /// Overwrite the existing profile in place.
    #[default]
    Replace,
    /// Fail if a profile already exists.
    RejectExisting,
}
