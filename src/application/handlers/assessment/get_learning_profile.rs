//! GetLearningProfileHandler - Query handler for a learner's stored profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::learning::StoredLearningProfile;
use crate::ports::LearningProfileRepository;

/// Query for the profile of a user.
#[derive(Debug, Clone)]
pub struct GetLearningProfileQuery {
    pub user_id: UserId,
}

/// Handler for profile lookup. Absence is not an error.
pub struct GetLearningProfileHandler {
    profiles: Arc<dyn LearningProfileRepository>,
}

impl GetLearningProfileHandler {
    pub fn new(profiles: Arc<dyn LearningProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: GetLearningProfileQuery) -> Result<Option<StoredLearningProfile>, DomainError> {
        self.profiles.find_by_user(&query.user_id).await
    }
}
