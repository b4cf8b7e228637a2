//! In-memory LearningProfileRepository, keyed by user.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::learning::StoredLearningProfile;
use crate::ports::LearningProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLearningProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, StoredLearningProfile>>>,
    fail_writes: bool,
}

impl InMemoryLearningProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose writes always fail with `DatabaseError`.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated learning_profiles write failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LearningProfileRepository for InMemoryLearningProfileRepository {
    async fn insert(&self, profile: &StoredLearningProfile) -> Result<(), DomainError> {
        self.check_writable()?;

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.user_id) {
            return Err(DomainError::new(
                ErrorCode::ProfileAlreadyExists,
                format!("User {} already has a learning profile", profile.user_id),
            ));
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn upsert(&self, profile: &StoredLearningProfile) -> Result<StoredLearningProfile, DomainError> {
        self.check_writable()?;

        let mut profiles = self.profiles.write().await;
        let stored = match profiles.get(&profile.user_id) {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.replace_analysis(profile.assessment_score.clone());
                updated
            }
            None => profile.clone(),
        };
        profiles.insert(stored.user_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StoredLearningProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}
