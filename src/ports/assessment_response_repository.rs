//! AssessmentResponseRepository port for raw questionnaire submissions.

use async_trait::async_trait;

use crate::domain::assessment::AssessmentResponseRecord;
use crate::domain::foundation::{DomainError, UserId};

/// Append-only store of raw submissions.
#[async_trait]
pub trait AssessmentResponseRepository: Send + Sync {
    /// Persist a new submission.
    async fn save(&self, record: &AssessmentResponseRecord) -> Result<(), DomainError>;

    /// All submissions of a user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AssessmentResponseRecord>, DomainError>;
}
