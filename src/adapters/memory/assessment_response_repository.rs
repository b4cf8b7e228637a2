//! In-memory AssessmentResponseRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::AssessmentResponseRecord;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::AssessmentResponseRepository;

/// Stores submissions in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentResponseRepository {
    records: Arc<RwLock<Vec<AssessmentResponseRecord>>>,
    fail_writes: bool,
}

impl InMemoryAssessmentResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose `save` always fails with `DatabaseError`.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of stored submissions across all users.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn all(&self) -> Vec<AssessmentResponseRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl AssessmentResponseRepository for InMemoryAssessmentResponseRepository {
    async fn save(&self, record: &AssessmentResponseRecord) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated assessment_responses insert failure",
            ));
        }

        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AssessmentResponseRecord>, DomainError> {
        let records = self.records.read().await;
        let mut mine: Vec<_> = records
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort, then reverse: ties keep newest-inserted first.
        mine.sort_by_key(|r| r.completed_at);
        mine.reverse();
        Ok(mine)
    }
}
