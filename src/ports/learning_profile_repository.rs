//! LearningProfileRepository port for derived learning profiles.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::learning::StoredLearningProfile;

/// Store of learning profiles, at most one per user.
#[async_trait]
pub trait LearningProfileRepository: Send + Sync {
    /// Insert a profile for a user who has none.
    ///
    /// Fails with `ErrorCode::ProfileAlreadyExists` if the user already has one.
    async fn insert(&self, profile: &StoredLearningProfile) -> Result<(), DomainError>;

    /// Write the user's profile, replacing any existing one.
    ///
    /// An existing row keeps its `id` and `created_at`; the stored profile is
    /// returned.
    async fn upsert(&self, profile: &StoredLearningProfile) -> Result<StoredLearningProfile, DomainError>;

    /// Find the profile of a user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StoredLearningProfile>, DomainError>;
}
