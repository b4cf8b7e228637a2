//! PostgreSQL implementation of AssessmentResponseRepository.
//!
//! Expected table:
//!
//! ```sql
//! CREATE TABLE assessment_responses (
//!     id              UUID PRIMARY KEY,
//!     user_id         UUID NOT NULL,
//!     assessment_type TEXT NOT NULL,
//!     responses       JSONB NOT NULL,
//!     score           JSONB,
//!     completed_at    TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::column;
use crate::domain::assessment::{AssessmentResponseRecord, QuestionnaireResponse};
use crate::domain::foundation::{AssessmentResponseId, DomainError, Timestamp, UserId};
use crate::ports::AssessmentResponseRepository;

/// PostgreSQL implementation of AssessmentResponseRepository.
#[derive(Clone)]
pub struct PostgresAssessmentResponseRepository {
    pool: PgPool,
}

impl PostgresAssessmentResponseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentResponseRepository for PostgresAssessmentResponseRepository {
    async fn save(&self, record: &AssessmentResponseRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO assessment_responses (
                id, user_id, assessment_type, responses, score, completed_at
            ) VALUES ($1, $2::uuid, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_str())
        .bind(&record.assessment_type)
        .bind(Json(&record.responses))
        .bind(record.score.as_ref())
        .bind(record.completed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert assessment responses", e))?;

        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AssessmentResponseRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id::text AS user_id, assessment_type, responses, score, completed_at
            FROM assessment_responses
            WHERE user_id = $1::uuid
            ORDER BY completed_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch assessment responses", e))?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: PgRow) -> Result<AssessmentResponseRecord, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let user_id: String = column(&row, "user_id")?;
    let assessment_type: String = column(&row, "assessment_type")?;
    let responses: Json<QuestionnaireResponse> = column(&row, "responses")?;
    let score: Option<serde_json::Value> = column(&row, "score")?;
    let completed_at: chrono::DateTime<chrono::Utc> = column(&row, "completed_at")?;

    Ok(AssessmentResponseRecord {
        id: AssessmentResponseId::from_uuid(id),
        user_id: UserId::new(user_id).map_err(|e| DomainError::database("Invalid user_id", e))?,
        assessment_type,
        responses: responses.0,
        score,
        completed_at: Timestamp::from_datetime(completed_at),
    })
}
