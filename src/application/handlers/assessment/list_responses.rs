//! ListAssessmentResponsesHandler - Query handler for raw submission history.

use std::sync::Arc;

use crate::domain::assessment::AssessmentResponseRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::AssessmentResponseRepository;

#[derive(Debug, Clone)]
pub struct ListAssessmentResponsesQuery {
    pub user_id: UserId,
}

/// Lists a user's submissions, newest first.
pub struct ListAssessmentResponsesHandler {
    responses: Arc<dyn AssessmentResponseRepository>,
}

impl ListAssessmentResponsesHandler {
    pub fn new(responses: Arc<dyn AssessmentResponseRepository>) -> Self {
        Self { responses }
    }

    pub async fn handle(
        &self,
        query: ListAssessmentResponsesQuery,
    ) -> Result<Vec<AssessmentResponseRecord>, DomainError> {
        self.responses.list_by_user(&query.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssessmentResponseRepository;
    use crate::domain::assessment::{fixtures::screening_response, INITIAL_SCREENING};

    #[tokio::test]
    async fn lists_only_own_submissions() {
        let repo = InMemoryAssessmentResponseRepository::new();
        let me = UserId::new("learner-1").unwrap();
        let other = UserId::new("learner-2").unwrap();
        repo.save(&AssessmentResponseRecord::new(me.clone(), INITIAL_SCREENING, screening_response()))
            .await
            .unwrap();
        repo.save(&AssessmentResponseRecord::new(other, INITIAL_SCREENING, screening_response()))
            .await
            .unwrap();

        let handler = ListAssessmentResponsesHandler::new(Arc::new(repo));
        let listed = handler.handle(ListAssessmentResponsesQuery { user_id: me.clone() }).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, me);
    }
}
